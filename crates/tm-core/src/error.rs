//! Error types for tm-core

use thiserror::Error;

/// Errors raised while splitting a migration document into statements
#[derive(Error, Debug)]
pub enum ParseError {
    /// P001: A statement was left open at a direction change or end of input
    #[error("[P001] The last statement must be ended by {}", terminator_hint(.line_separator))]
    UnterminatedStatement { line_separator: Option<String> },

    /// P002: StatementBegin without a matching StatementEnd
    #[error("[P002] Saw '-- +migrate StatementBegin' with no matching '-- +migrate StatementEnd'")]
    DanglingStatementBlock,

    /// P003: No Up/Down directive anywhere in the document
    #[error("[P003] No Up/Down annotations found, so no statements were executed")]
    NoDirectionFound,

    /// P004: Directive prefix without a command token
    #[error("[P004] Incomplete migration command on line {line}")]
    MalformedDirective { line: usize },

    /// P005: Reading the document failed
    #[error("[P005] Failed to read migration document: {0}")]
    Io(#[from] std::io::Error),
}

fn terminator_hint(line_separator: &Option<String>) -> String {
    match line_separator {
        Some(sep) => format!(
            "a semicolon, a line whose contents are {sep:?}, or a '-- +migrate StatementEnd' marker"
        ),
        None => "a semicolon or a '-- +migrate StatementEnd' marker".to_string(),
    }
}

/// Result type alias for ParseError
pub type ParseResult<T> = Result<T, ParseError>;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Migration name has no leading version number
    #[error("[E001] No version number in migration name: {name}")]
    InvalidVersionName { name: String },

    /// E002: Two migrations resolve to the same version
    #[error("[E002] Duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: i64,
        first: String,
        second: String,
    },

    /// E003: A migration document failed to parse
    #[error("[E003] Error parsing migration {version} ({name}): {source}")]
    MigrationParse {
        name: String,
        version: i64,
        #[source]
        source: ParseError,
    },

    /// E004: Configuration file not found
    #[error("[E004] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E005: Failed to parse configuration file
    #[error("[E005] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E006: Invalid configuration value
    #[error("[E006] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E007: IO error with file path context
    #[error("[E007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E008: IO error
    #[error("[E008] IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
