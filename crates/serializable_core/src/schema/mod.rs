//! Static schema tables for serializable entities.
//!
//! # Responsibility
//! - Describe each entity's scalar and foreign-key fields without reflection.
//! - Carry per-type serialization defaults set at registration time.
//!
//! # Invariants
//! - A schema is built once per entity type and shared for the process lifetime.

pub mod entity;
pub mod field;

pub use entity::{EntitySchema, EntitySchemaBuilder, SchemaError};
pub use field::{FieldDescriptor, FieldKind, FOREIGN_KEY_SUFFIX};
