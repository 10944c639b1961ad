//! Migration planner
//!
//! Given a version-sorted catalog and the most recently applied version,
//! decides which migrations run next and in which order.
//!
//! # Stale watermarks
//!
//! When `last_applied` names a version that is not in the catalog, the
//! planner behaves as if nothing had been applied: planning `Up` replays the
//! whole catalog and planning `Down` yields nothing. Callers that can end up
//! with bookkeeping out of sync with their migration files should check
//! [`Catalog::get`](crate::Catalog::get) before executing a plan.

use crate::migration::{Direction, Migration};

/// A migration paired with the statements to run for one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedStep<'a> {
    /// The migration being applied or reverted
    pub migration: &'a Migration,
    /// Up statements when applying, down statements when reverting
    pub statements: &'a [String],
}

impl<'a> PlannedStep<'a> {
    /// Select the statements of `migration` for `direction`.
    pub fn new(migration: &'a Migration, direction: Direction) -> Self {
        Self {
            migration,
            statements: migration.statements(direction),
        }
    }
}

/// Compute the ordered steps for `direction`.
///
/// `catalog` must be sorted ascending by version with unique versions.
/// `last_applied` is the highest version recorded as applied, if any.
pub fn plan(
    catalog: &[Migration],
    last_applied: Option<i64>,
    direction: Direction,
) -> Vec<PlannedStep<'_>> {
    let position = last_applied
        .and_then(|version| catalog.iter().position(|m| m.version == version));

    let step = |migration| PlannedStep::new(migration, direction);

    let steps: Vec<PlannedStep<'_>> = match (direction, position) {
        (Direction::Up, Some(idx)) => catalog[idx + 1..].iter().map(step).collect(),
        (Direction::Up, None) => catalog.iter().map(step).collect(),
        (Direction::Down, Some(idx)) => catalog[..=idx].iter().rev().map(step).collect(),
        (Direction::Down, None) => Vec::new(),
    };

    if last_applied.is_some() && position.is_none() {
        log::debug!(
            "Last applied version {:?} not found in catalog of {} migration(s)",
            last_applied,
            catalog.len()
        );
    }

    steps
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
