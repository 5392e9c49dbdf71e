use rusqlite::Connection;
use serializable_core::db::migrations::{apply_migrations, current_user_version, latest_version};
use serializable_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_in_memory_applies_latest_schema() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);

    for table in ["users", "settings", "posts"] {
        let exists: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1, "missing table {table}");
    }
}

#[test]
fn reopening_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        conn.execute("INSERT INTO users (email, name) VALUES ('a@b.c', 'A');", [])
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
        .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, latest_supported }
            if db_version == latest_version() + 1 && latest_supported == latest_version()
    ));
}

#[test]
fn settings_require_existing_user() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO settings (user_id, email_notifications) VALUES (42, 0);",
        [],
    );
    assert!(result.is_err());
}
