//! User entity.

use crate::schema::{EntitySchema, FieldDescriptor};
use crate::serialize::SerializeOptions;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Field table for `users`.
///
/// Only `name` is serialized unless the caller asks for more.
pub static USER_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::builder("user")
        .field(FieldDescriptor::scalar("id"))
        .field(FieldDescriptor::scalar("email"))
        .field(FieldDescriptor::scalar("name"))
        .defaults(SerializeOptions::new().with_fields(["name"]))
        .build()
        .expect("valid user schema")
});

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Insert payload for a user; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
