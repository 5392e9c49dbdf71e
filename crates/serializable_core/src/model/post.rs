//! Post entity, many-to-one with `User`.

use super::user::UserId;
use crate::schema::{EntitySchema, FieldDescriptor};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub type PostId = i64;

/// Field table for `posts`.
///
/// `created_at` is assigned by storage and hidden from editable-only output.
pub static POST_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::builder("post")
        .field(FieldDescriptor::scalar("id"))
        .field(FieldDescriptor::foreign_key("user", "user"))
        .field(FieldDescriptor::scalar("text"))
        .field(FieldDescriptor::scalar("created_at").non_editable())
        .build()
        .expect("valid post schema")
});

/// Persisted post row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub text: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Insert payload for a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: UserId,
    pub text: String,
}

impl NewPost {
    pub fn new(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: text.into(),
        }
    }
}
