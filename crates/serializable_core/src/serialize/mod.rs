//! Recursive record-to-mapping serialization.
//!
//! # Responsibility
//! - Project a record's declared fields into a flat mapping.
//! - Walk dotted relation paths (`posts__comments`) and nest related output.
//! - Apply the same serialization across ordered record collections.
//!
//! # Invariants
//! - Records are only read, never mutated.
//! - Absent and unknown relations are omitted, never reported as errors.
//! - Output keys are projected field keys plus traversed relation names.

pub mod collection;
pub mod error;
pub mod options;
pub mod path;
pub mod projector;
pub mod walker;

use crate::schema::{EntitySchema, FieldDescriptor};
use serde_json::Value;

pub use collection::{serialize_all, RecordSet};
pub use error::{FetchError, RelationError, RelationResult, SerializeError, SerializeResult};
pub use options::SerializeOptions;
pub use path::{group_path_specs, split_path, PathGroup, PATH_DELIMITER};
pub use projector::project;
pub use walker::{serialize, serialize_with};

/// Plain key-value output of one serialized record.
pub type SerializedMap = serde_json::Map<String, Value>;

/// Persistent record readable by the serializer.
///
/// Implemented by the persistence layer for each bound entity type.
pub trait Record {
    /// Returns the entity's static field table.
    fn schema(&self) -> SerializeResult<&EntitySchema>;

    /// Reads the current value of one declared field.
    ///
    /// Foreign-key fields return the raw key, not the related record.
    fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value>;

    /// Resolves a named relation, possibly loading it from storage.
    fn relation(&self, name: &str) -> RelationResult<Related<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn schema(&self) -> SerializeResult<&EntitySchema> {
        (**self).schema()
    }

    fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value> {
        (**self).field_value(field)
    }

    fn relation(&self, name: &str) -> RelationResult<Related<'_>> {
        (**self).relation(name)
    }
}

/// Resolved relation target, tagged by the contract it exposes.
pub enum Related<'a> {
    /// Single related record.
    Single(Box<dyn SingleSerializable + 'a>),
    /// Ordered collection of related records.
    Collection(Box<dyn CollectionSerializable + 'a>),
    /// Attribute without a serialization contract.
    Opaque { type_name: &'static str },
}

impl<'a> Related<'a> {
    pub fn single(target: impl SingleSerializable + 'a) -> Self {
        Self::Single(Box::new(target))
    }

    pub fn collection(target: impl CollectionSerializable + 'a) -> Self {
        Self::Collection(Box::new(target))
    }
}

/// Single-record serialization entry point.
pub trait SingleSerializable {
    fn serialize(&self, path_specs: &[&str]) -> SerializeResult<SerializedMap>;
}

impl<R: Record + ?Sized> SingleSerializable for R {
    fn serialize(&self, path_specs: &[&str]) -> SerializeResult<SerializedMap> {
        walker::serialize(self, path_specs)
    }
}

/// Collection-level serialization entry point.
pub trait CollectionSerializable {
    /// Serializes every element in collection order.
    fn serialize_all(&self, path_specs: &[&str]) -> SerializeResult<Vec<SerializedMap>>;
}
