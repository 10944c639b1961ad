use super::*;

fn migration(version: i64) -> Migration {
    Migration {
        version,
        name: format!("{version}_m.sql"),
        up: vec![format!("CREATE TABLE t{version} (id INT);\n")],
        down: vec![format!("DROP TABLE t{version};\n")],
    }
}

fn catalog(versions: &[i64]) -> Vec<Migration> {
    versions.iter().copied().map(migration).collect()
}

fn versions(steps: &[PlannedStep<'_>]) -> Vec<i64> {
    steps.iter().map(|s| s.migration.version).collect()
}

#[test]
fn test_up_from_watermark() {
    let catalog = catalog(&[1, 2, 3, 5]);
    let steps = plan(&catalog, Some(2), Direction::Up);
    assert_eq!(versions(&steps), vec![3, 5]);
}

#[test]
fn test_up_with_nothing_applied_runs_everything() {
    let catalog = catalog(&[1, 2, 3, 5]);
    let steps = plan(&catalog, None, Direction::Up);
    assert_eq!(versions(&steps), vec![1, 2, 3, 5]);
}

#[test]
fn test_up_when_fully_applied_is_empty() {
    let catalog = catalog(&[1, 2, 3, 5]);
    let steps = plan(&catalog, Some(5), Direction::Up);
    assert!(steps.is_empty());
}

#[test]
fn test_down_reverts_newest_first() {
    let catalog = catalog(&[1, 2, 3, 5]);
    let steps = plan(&catalog, Some(5), Direction::Down);
    assert_eq!(versions(&steps), vec![5, 3, 2, 1]);
}

#[test]
fn test_down_from_middle_watermark() {
    let catalog = catalog(&[1, 2, 3, 5]);
    let steps = plan(&catalog, Some(2), Direction::Down);
    assert_eq!(versions(&steps), vec![2, 1]);
}

#[test]
fn test_down_with_nothing_applied_is_empty() {
    let catalog = catalog(&[1, 2, 3, 5]);
    assert!(plan(&catalog, None, Direction::Down).is_empty());
}

#[test]
fn test_empty_catalog() {
    assert!(plan(&[], None, Direction::Up).is_empty());
    assert!(plan(&[], Some(3), Direction::Up).is_empty());
    assert!(plan(&[], Some(3), Direction::Down).is_empty());
}

#[test]
fn test_stale_watermark_replays_catalog_on_up() {
    let catalog = catalog(&[1, 2, 3, 5]);
    let steps = plan(&catalog, Some(4), Direction::Up);
    assert_eq!(versions(&steps), vec![1, 2, 3, 5]);
}

#[test]
fn test_stale_watermark_reverts_nothing_on_down() {
    let catalog = catalog(&[1, 2, 3, 5]);
    assert!(plan(&catalog, Some(4), Direction::Down).is_empty());
}

#[test]
fn test_steps_carry_direction_statements() {
    let catalog = catalog(&[1, 2]);

    let up = plan(&catalog, None, Direction::Up);
    assert_eq!(up[0].statements, ["CREATE TABLE t1 (id INT);\n"]);
    assert_eq!(up[1].statements, ["CREATE TABLE t2 (id INT);\n"]);

    let down = plan(&catalog, Some(2), Direction::Down);
    assert_eq!(down[0].statements, ["DROP TABLE t2;\n"]);
    assert_eq!(down[1].statements, ["DROP TABLE t1;\n"]);
}

#[test]
fn test_planning_is_repeatable() {
    let catalog = catalog(&[1, 2, 3]);
    let first = plan(&catalog, Some(1), Direction::Up);
    let second = plan(&catalog, Some(1), Direction::Up);
    assert_eq!(first, second);
}
