//! Per-user settings, one-to-one with `User`.

use super::user::UserId;
use crate::schema::{EntitySchema, FieldDescriptor};
use crate::serialize::SerializeOptions;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Field table for `settings`.
///
/// The owning `user` key is hidden by default.
pub static SETTINGS_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::builder("settings")
        .field(FieldDescriptor::foreign_key("user", "user"))
        .field(FieldDescriptor::scalar("email_notifications"))
        .defaults(SerializeOptions::new().with_exclude(["user"]))
        .build()
        .expect("valid settings schema")
});

/// Persisted settings row keyed by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub user_id: UserId,
    pub email_notifications: bool,
}

impl Settings {
    /// Settings for `user_id` with notifications off.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            email_notifications: false,
        }
    }
}
