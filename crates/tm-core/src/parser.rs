//! Migration document parser
//!
//! Splits one migration document into ordered "up" and "down" statement
//! lists. Sections are introduced by directive comments:
//!
//! ```sql
//! -- +migrate Up
//! CREATE TABLE people (id INT);
//!
//! -- +migrate StatementBegin
//! CREATE FUNCTION touch() RETURNS trigger AS $$
//! BEGIN
//!     NEW.updated_at = now();
//!     RETURN NEW;
//! END;
//! $$ LANGUAGE plpgsql;
//! -- +migrate StatementEnd
//!
//! -- +migrate Down
//! DROP FUNCTION touch();
//! DROP TABLE people;
//! ```
//!
//! The base case splits on lines ending with a semicolon. Bodies such as
//! pl/pgsql functions contain semicolons of their own, so the
//! `StatementBegin` / `StatementEnd` pair suppresses splitting until the block
//! is closed.

use crate::error::{ParseError, ParseResult};
use crate::migration::Direction;
use std::io::BufRead;

/// Prefix shared by every directive line.
pub const DIRECTIVE_PREFIX: &str = "-- +migrate ";

/// Any line starting with this is never accumulated into a statement.
const DIRECTIVE_MARKER: &str = "-- +";

/// Plain SQL comment lines starting with this (and not a directive) are skipped.
const COMMENT_MARKER: &str = "-- ";

/// Per-call parser options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Exact line contents that terminate a statement, e.g. `GO` for MSSQL.
    ///
    /// The separator line itself is dropped from the output.
    pub line_separator: Option<String>,
}

impl ParseOptions {
    /// Options with a line separator configured.
    pub fn with_line_separator(separator: impl Into<String>) -> Self {
        Self {
            line_separator: Some(separator.into()),
        }
    }
}

/// Statements extracted from a single migration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMigration {
    /// Statements to apply, in source order
    pub up_statements: Vec<String>,
    /// Statements to revert, in source order
    pub down_statements: Vec<String>,
}

impl ParsedMigration {
    /// Statements for the given direction.
    pub fn statements(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Up => &self.up_statements,
            Direction::Down => &self.down_statements,
        }
    }

    fn push(&mut self, direction: Direction, statement: String) {
        match direction {
            Direction::Up => self.up_statements.push(statement),
            Direction::Down => self.down_statements.push(statement),
        }
    }
}

/// Recognized directive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Up,
    Down,
    StatementBegin,
    StatementEnd,
    /// Unknown commands are tolerated and have no effect.
    Other,
}

/// Parse a directive line into its command.
///
/// Returns `Ok(None)` when the line is not a directive. Trailing options after
/// the command token are accepted and ignored.
fn parse_directive(line: &str, line_no: usize) -> ParseResult<Option<Command>> {
    let Some(rest) = line.strip_prefix(DIRECTIVE_PREFIX) else {
        return Ok(None);
    };

    let command = match rest.split_whitespace().next() {
        Some("Up") => Command::Up,
        Some("Down") => Command::Down,
        Some("StatementBegin") => Command::StatementBegin,
        Some("StatementEnd") => Command::StatementEnd,
        Some(_) => Command::Other,
        None => return Err(ParseError::MalformedDirective { line: line_no }),
    };
    Ok(Some(command))
}

/// Check whether the line ends a statement with a semicolon.
///
/// Anything after an inline `--` comment is ignored, so
/// `SELECT 1; -- done` ends a statement while `SELECT 1 -- no;` does not.
pub fn ends_with_semicolon(line: &str) -> bool {
    line.split_whitespace()
        .take_while(|word| !word.starts_with("--"))
        .last()
        .is_some_and(|word| word.ends_with(';'))
}

#[derive(Debug, Default)]
struct ParserState {
    /// `None` until the first Up/Down directive.
    direction: Option<Direction>,
    /// Inside a StatementBegin/StatementEnd block.
    statement_open: bool,
    /// Set by a StatementEnd that closed an open block; consumed by the flush.
    statement_ended: bool,
}

impl ParserState {
    fn apply(
        &mut self,
        command: Command,
        buf: &str,
        options: &ParseOptions,
    ) -> ParseResult<()> {
        match command {
            Command::Up | Command::Down => {
                if !buf.trim().is_empty() {
                    return Err(ParseError::UnterminatedStatement {
                        line_separator: options.line_separator.clone(),
                    });
                }
                self.direction = Some(if command == Command::Up {
                    Direction::Up
                } else {
                    Direction::Down
                });
            }
            Command::StatementBegin => {
                if self.direction.is_some() {
                    self.statement_open = true;
                }
            }
            Command::StatementEnd => {
                if self.direction.is_some() {
                    self.statement_ended = self.statement_open;
                    self.statement_open = false;
                }
            }
            Command::Other => {}
        }
        Ok(())
    }
}

/// Split a migration document into up and down statements.
///
/// Each returned statement keeps its original lines, each terminated by a
/// newline. Comment lines, directive lines and separator lines are dropped.
pub fn parse_migration<R: BufRead>(
    reader: R,
    options: &ParseOptions,
) -> ParseResult<ParsedMigration> {
    let mut parsed = ParsedMigration::default();
    let mut state = ParserState::default();
    let mut buf = String::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;

        if line.starts_with(COMMENT_MARKER) && !line.starts_with(DIRECTIVE_MARKER) {
            continue;
        }

        if let Some(command) = parse_directive(&line, idx + 1)? {
            state.apply(command, &buf, options)?;
        }

        let Some(direction) = state.direction else {
            continue;
        };

        let is_line_separator = !state.statement_open
            && options
                .line_separator
                .as_deref()
                .is_some_and(|sep| !sep.is_empty() && line == sep);

        if !is_line_separator && !line.starts_with(DIRECTIVE_MARKER) {
            buf.push_str(&line);
            buf.push('\n');
        }

        let terminated =
            !state.statement_open && (ends_with_semicolon(&line) || is_line_separator);
        if terminated || state.statement_ended {
            state.statement_ended = false;
            parsed.push(direction, std::mem::take(&mut buf));
        }
    }

    if state.statement_open {
        return Err(ParseError::DanglingStatementBlock);
    }

    if state.direction.is_none() {
        return Err(ParseError::NoDirectionFound);
    }

    // A section holding nothing but comments is allowed, e.g.
    //   -- +migrate Down
    //   -- nothing to downgrade!
    if !buf.trim().is_empty() && !buf.starts_with(DIRECTIVE_MARKER) {
        return Err(ParseError::UnterminatedStatement {
            line_separator: options.line_separator.clone(),
        });
    }

    log::debug!(
        "Parsed migration: {} up, {} down statement(s)",
        parsed.up_statements.len(),
        parsed.down_statements.len()
    );
    Ok(parsed)
}

/// Convenience wrapper around [`parse_migration`] for in-memory documents.
pub fn parse_migration_str(document: &str, options: &ParseOptions) -> ParseResult<ParsedMigration> {
    parse_migration(document.as_bytes(), options)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
