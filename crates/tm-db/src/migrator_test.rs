use super::*;
use crate::DuckDbBackend;
use tm_core::ParseOptions;

const TABLE: &str = "tidemark_migrations";

fn catalog() -> Catalog {
    let sources = vec![
        (
            "1_users.sql",
            "-- +migrate Up\nCREATE TABLE users (id INT);\n-- +migrate Down\nDROP TABLE users;\n",
        ),
        (
            "2_posts.sql",
            "-- +migrate Up\nCREATE TABLE posts (id INT);\n-- +migrate Down\nDROP TABLE posts;\n",
        ),
        (
            "5_counter.sql",
            "\
-- +migrate Up
-- +migrate StatementBegin
CREATE TABLE counter (n INT);
INSERT INTO counter VALUES (0);
-- +migrate StatementEnd
-- +migrate Down
DROP TABLE counter;
",
        ),
    ];
    Catalog::from_sources(sources, &ParseOptions::default()).unwrap()
}

fn migrator() -> (Arc<DuckDbBackend>, Migrator) {
    let db = Arc::new(DuckDbBackend::in_memory().unwrap());
    let migrator = Migrator::new(db.clone(), catalog(), TABLE);
    (db, migrator)
}

fn applied_versions(statuses: &[MigrationStatus]) -> Vec<i64> {
    statuses
        .iter()
        .filter(|s| s.is_applied())
        .map(|s| s.version)
        .collect()
}

#[tokio::test]
async fn test_exec_up_applies_everything() {
    let (db, migrator) = migrator();

    let applied = migrator.exec(Direction::Up).await.unwrap();
    assert_eq!(applied, 3);
    assert!(db.relation_exists("users").await.unwrap());
    assert!(db.relation_exists("posts").await.unwrap());
    assert_eq!(migrator.last_applied().await.unwrap(), Some(5));
}

#[tokio::test]
async fn test_exec_up_is_idempotent() {
    let (_db, migrator) = migrator();
    migrator.exec(Direction::Up).await.unwrap();

    assert_eq!(migrator.exec(Direction::Up).await.unwrap(), 0);
    assert!(migrator.plan(Direction::Up, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exec_down_reverts_everything() {
    let (db, migrator) = migrator();
    migrator.exec(Direction::Up).await.unwrap();

    let reverted = migrator.exec(Direction::Down).await.unwrap();
    assert_eq!(reverted, 3);
    assert!(!db.relation_exists("users").await.unwrap());
    assert_eq!(migrator.last_applied().await.unwrap(), None);
}

#[tokio::test]
async fn test_exec_down_with_nothing_applied() {
    let (_db, migrator) = migrator();
    assert_eq!(migrator.exec(Direction::Down).await.unwrap(), 0);
}

#[tokio::test]
async fn test_exec_max_limits_steps() {
    let (db, migrator) = migrator();

    assert_eq!(migrator.exec_max(Direction::Up, 1).await.unwrap(), 1);
    assert_eq!(migrator.last_applied().await.unwrap(), Some(1));
    assert!(!db.relation_exists("posts").await.unwrap());

    migrator.exec(Direction::Up).await.unwrap();
    assert_eq!(migrator.exec_max(Direction::Down, 1).await.unwrap(), 1);
    assert_eq!(migrator.last_applied().await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_plan_does_not_execute() {
    let (db, migrator) = migrator();

    let steps = migrator.plan(Direction::Up, 0).await.unwrap();
    let versions: Vec<i64> = steps.iter().map(|s| s.migration.version).collect();
    assert_eq!(versions, vec![1, 2, 5]);
    assert!(!db.relation_exists("users").await.unwrap());
    assert!(db.relation_exists(TABLE).await.unwrap());
}

#[tokio::test]
async fn test_failed_migration_rolls_back_whole_run() {
    let db = Arc::new(DuckDbBackend::in_memory().unwrap());
    let sources = vec![
        (
            "1_ok.sql",
            "-- +migrate Up\nCREATE TABLE ok (id INT);\n",
        ),
        (
            "2_broken.sql",
            "-- +migrate Up\nCREATE TABLE broken (id INT);\nINSERT INTO missing VALUES (1);\n",
        ),
    ];
    let catalog = Catalog::from_sources(sources, &ParseOptions::default()).unwrap();
    let migrator = Migrator::new(db.clone(), catalog, TABLE);

    let err = migrator.exec(Direction::Up).await.unwrap_err();
    match err {
        DbError::MigrationFailed { version, name, .. } => {
            assert_eq!(version, 2);
            assert_eq!(name, "2_broken.sql");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(!db.relation_exists("ok").await.unwrap());
    assert!(!db.relation_exists("broken").await.unwrap());
    assert_eq!(migrator.last_applied().await.unwrap(), None);
}

#[tokio::test]
async fn test_status_reports_applied_and_pending() {
    let (_db, migrator) = migrator();
    migrator.exec_max(Direction::Up, 2).await.unwrap();

    let statuses = migrator.status().await.unwrap();
    assert_eq!(statuses.len(), 3);
    assert_eq!(applied_versions(&statuses), vec![1, 2]);
    assert!(statuses.iter().all(|s| s.in_catalog));
    assert_eq!(statuses[2].name, "5_counter.sql");
    assert!(!statuses[2].is_applied());
}

#[tokio::test]
async fn test_status_does_not_create_table() {
    let (db, migrator) = migrator();

    let statuses = migrator.status().await.unwrap();
    assert_eq!(statuses.len(), 3);
    assert!(applied_versions(&statuses).is_empty());
    assert!(!db.relation_exists(TABLE).await.unwrap());
}

#[tokio::test]
async fn test_status_with_qualified_table() {
    let db = Arc::new(DuckDbBackend::in_memory().unwrap());
    let migrator = Migrator::new(db.clone(), catalog(), "meta.schema_migrations");
    assert!(applied_versions(&migrator.status().await.unwrap()).is_empty());

    migrator.exec_max(Direction::Up, 1).await.unwrap();
    assert_eq!(applied_versions(&migrator.status().await.unwrap()), vec![1]);
}

#[tokio::test]
async fn test_status_flags_records_missing_from_catalog() {
    let (db, migrator) = migrator();
    db.ensure_migration_table(TABLE).await.unwrap();
    db.insert_record(
        TABLE,
        &MigrationRecord {
            version: 4,
            name: "4_gone.sql".to_string(),
            applied_at: chrono::Utc::now().naive_utc(),
        },
    )
    .await
    .unwrap();

    let statuses = migrator.status().await.unwrap();
    let versions: Vec<i64> = statuses.iter().map(|s| s.version).collect();
    assert_eq!(versions, vec![1, 2, 4, 5]);
    assert!(!statuses[2].in_catalog);
}

#[tokio::test]
async fn test_stale_watermark_replays_catalog() {
    let (db, migrator) = migrator();
    db.ensure_migration_table(TABLE).await.unwrap();
    db.insert_record(
        TABLE,
        &MigrationRecord {
            version: 9,
            name: "9_gone.sql".to_string(),
            applied_at: chrono::Utc::now().naive_utc(),
        },
    )
    .await
    .unwrap();

    let steps = migrator.plan(Direction::Up, 0).await.unwrap();
    assert_eq!(steps.len(), 3);
    assert!(migrator.plan(Direction::Down, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_table_name() {
    let db = Arc::new(DuckDbBackend::in_memory().unwrap());
    let migrator = Migrator::new(db.clone(), catalog(), "meta.schema_migrations");
    migrator.exec(Direction::Up).await.unwrap();
    assert_eq!(migrator.table(), "meta.schema_migrations");
    assert!(db.relation_exists("meta.schema_migrations").await.unwrap());
}
