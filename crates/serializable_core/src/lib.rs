//! Recursive dictionary serialization for persistent records.
//!
//! A record is projected into a flat `serde_json` mapping and, on request,
//! related records named by `__`-delimited paths are nested under their
//! relation names. A SQLite-backed entity set (`db`, `model`, `repo`) binds
//! the serializer to real storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schema;
pub mod serialize;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{NewPost, NewUser, Post, Settings, User};
pub use repo::{
    Bound, PostRepository, RepoError, RepoResult, SettingsRepository, SqlitePostRepository,
    SqliteSettingsRepository, SqliteUserRepository, UserRepository,
};
pub use schema::{EntitySchema, FieldDescriptor, FieldKind, SchemaError};
pub use serialize::{
    project, serialize, serialize_all, serialize_with, CollectionSerializable, Record,
    RecordSet, Related, RelationError, RelationResult, SerializeError, SerializeOptions,
    SerializeResult, SerializedMap, SingleSerializable,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
