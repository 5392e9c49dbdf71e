//! Settings repository and bound settings records.
//!
//! Relations: `user` (single).

use super::user_repo::load_user;
use super::{ensure_connection_ready, Bound, RepoError, RepoResult};
use crate::model::settings::{Settings, SETTINGS_SCHEMA};
use crate::model::user::UserId;
use crate::schema::{EntitySchema, FieldDescriptor};
use crate::serialize::{
    Record, Related, RelationError, RelationResult, SerializeError, SerializeResult,
};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// Repository interface for per-user settings.
pub trait SettingsRepository<'conn> {
    fn create_settings(&self, settings: &Settings) -> RepoResult<Bound<'conn, Settings>>;
    fn get_settings(&self, user_id: UserId) -> RepoResult<Option<Bound<'conn, Settings>>>;
    fn set_email_notifications(&self, user_id: UserId, enabled: bool) -> RepoResult<()>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl<'conn> SettingsRepository<'conn> for SqliteSettingsRepository<'conn> {
    fn create_settings(&self, settings: &Settings) -> RepoResult<Bound<'conn, Settings>> {
        self.conn.execute(
            "INSERT INTO settings (user_id, email_notifications) VALUES (?1, ?2);",
            params![settings.user_id, settings.email_notifications],
        )?;
        Ok(Bound::new(self.conn, settings.clone()))
    }

    fn get_settings(&self, user_id: UserId) -> RepoResult<Option<Bound<'conn, Settings>>> {
        Ok(load_settings(self.conn, user_id)?.map(|row| Bound::new(self.conn, row)))
    }

    fn set_email_notifications(&self, user_id: UserId, enabled: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE settings SET email_notifications = ?2 WHERE user_id = ?1;",
            params![user_id, enabled],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "settings",
                id: user_id,
            });
        }
        Ok(())
    }
}

pub(crate) fn load_settings(conn: &Connection, user_id: UserId) -> RepoResult<Option<Settings>> {
    let raw = conn
        .query_row(
            "SELECT user_id, email_notifications FROM settings WHERE user_id = ?1;",
            [user_id],
            |row| Ok((row.get::<_, UserId>(0)?, row.get::<_, i64>(1)?)),
        )
        .optional()?;

    raw.map(|(user_id, flag)| {
        let email_notifications = match flag {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid email_notifications value `{other}` in settings"
                )));
            }
        };
        Ok(Settings {
            user_id,
            email_notifications,
        })
    })
    .transpose()
}

impl Record for Bound<'_, Settings> {
    fn schema(&self) -> SerializeResult<&EntitySchema> {
        Ok(&*SETTINGS_SCHEMA)
    }

    fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value> {
        match field.name() {
            "user" => Ok(Value::from(self.user_id)),
            "email_notifications" => Ok(Value::from(self.email_notifications)),
            other => Err(SerializeError::unreadable_field("settings", other)),
        }
    }

    fn relation(&self, name: &str) -> RelationResult<Related<'_>> {
        match name {
            "user" => {
                let user =
                    load_user(self.conn(), self.user_id)?.ok_or(RelationError::DoesNotExist)?;
                Ok(Related::single(Bound::new(self.conn(), user)))
            }
            _ => Err(RelationError::NoSuchAttribute),
        }
    }
}
