//! Reference entities and their static schemas.
//!
//! # Responsibility
//! - Define plain row structs for users, settings and posts.
//! - Register each entity's field table and serialization defaults.
//!
//! # Invariants
//! - Schema field order matches column declaration order.
//! - Row structs carry no connection; binding happens in `repo`.

pub mod post;
pub mod settings;
pub mod user;

pub use post::{NewPost, Post, PostId, POST_SCHEMA};
pub use settings::{Settings, SETTINGS_SCHEMA};
pub use user::{NewUser, User, UserId, USER_SCHEMA};
