//! SQLite repositories and bound records.
//!
//! # Responsibility
//! - Provide create/get/list APIs for the reference entities.
//! - Pair rows with their connection so relations resolve lazily.
//!
//! # Invariants
//! - Repositories only accept fully migrated connections.
//! - Relation lookups that find no row report `DoesNotExist`, not an error.

pub mod post_repo;
pub mod settings_repo;
pub mod user_repo;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::serialize::{RecordSet, RelationError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

pub use post_repo::{PostRepository, SqlitePostRepository};
pub use settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use user_repo::{SqliteUserRepository, UserRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for RelationError {
    fn from(value: RepoError) -> Self {
        Self::Fetch(Box::new(value))
    }
}

/// Row paired with the connection used to resolve its relations.
#[derive(Debug, Clone)]
pub struct Bound<'conn, T> {
    conn: &'conn Connection,
    row: T,
}

impl<'conn, T> Bound<'conn, T> {
    pub fn new(conn: &'conn Connection, row: T) -> Self {
        Self { conn, row }
    }

    pub fn conn(&self) -> &'conn Connection {
        self.conn
    }

    pub fn row(&self) -> &T {
        &self.row
    }

    pub fn into_row(self) -> T {
        self.row
    }
}

impl<T> Deref for Bound<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.row
    }
}

fn bind_rows<T>(conn: &Connection, rows: Vec<T>) -> RecordSet<Bound<'_, T>> {
    rows.into_iter().map(|row| Bound::new(conn, row)).collect()
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
