//! User repository and bound user records.
//!
//! Relations: `settings` (single, may be absent) and `post_set` (collection).

use super::post_repo::load_posts_for_user;
use super::settings_repo::load_settings;
use super::{bind_rows, ensure_connection_ready, Bound, RepoResult};
use crate::model::user::{NewUser, User, UserId, USER_SCHEMA};
use crate::schema::{EntitySchema, FieldDescriptor};
use crate::serialize::{
    Record, RecordSet, Related, RelationError, RelationResult, SerializeError, SerializeResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;

const USER_SELECT_SQL: &str = "SELECT id, email, name FROM users";

/// Repository interface for users.
pub trait UserRepository<'conn> {
    fn create_user(&self, user: &NewUser) -> RepoResult<Bound<'conn, User>>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<Bound<'conn, User>>>;
    /// Lists all users ordered by id.
    fn list_users(&self) -> RepoResult<RecordSet<Bound<'conn, User>>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl<'conn> UserRepository<'conn> for SqliteUserRepository<'conn> {
    fn create_user(&self, user: &NewUser) -> RepoResult<Bound<'conn, User>> {
        let row = self.conn.query_row(
            "INSERT INTO users (email, name) VALUES (?1, ?2)
             RETURNING id, email, name;",
            params![user.email.as_str(), user.name.as_str()],
            parse_user_row,
        )?;
        Ok(Bound::new(self.conn, row))
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<Bound<'conn, User>>> {
        Ok(load_user(self.conn, id)?.map(|row| Bound::new(self.conn, row)))
    }

    fn list_users(&self) -> RepoResult<RecordSet<Bound<'conn, User>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt
            .query_map([], parse_user_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bind_rows(self.conn, rows))
    }
}

pub(crate) fn load_user(conn: &Connection, id: UserId) -> RepoResult<Option<User>> {
    let user = conn
        .query_row(
            &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_user_row,
        )
        .optional()?;
    Ok(user)
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        name: row.get("name")?,
    })
}

impl Record for Bound<'_, User> {
    fn schema(&self) -> SerializeResult<&EntitySchema> {
        Ok(&*USER_SCHEMA)
    }

    fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value> {
        match field.name() {
            "id" => Ok(Value::from(self.id)),
            "email" => Ok(Value::from(self.email.as_str())),
            "name" => Ok(Value::from(self.name.as_str())),
            other => Err(SerializeError::unreadable_field("user", other)),
        }
    }

    fn relation(&self, name: &str) -> RelationResult<Related<'_>> {
        match name {
            "settings" => {
                let settings =
                    load_settings(self.conn(), self.id)?.ok_or(RelationError::DoesNotExist)?;
                Ok(Related::single(Bound::new(self.conn(), settings)))
            }
            "post_set" => {
                let posts = load_posts_for_user(self.conn(), self.id)?;
                Ok(Related::collection(bind_rows(self.conn(), posts)))
            }
            _ => Err(RelationError::NoSuchAttribute),
        }
    }
}
