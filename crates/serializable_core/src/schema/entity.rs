//! Entity field tables and registration-time serialization defaults.
//!
//! # Invariants
//! - Field names are unique within one entity.
//! - Field names never contain the relation path delimiter.
//! - Field order is declaration order and drives projection order.

use super::field::FieldDescriptor;
use crate::serialize::options::SerializeOptions;
use crate::serialize::path::PATH_DELIMITER;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Invalid schema declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    DuplicateField {
        entity: &'static str,
        field: &'static str,
    },
    InvalidFieldName {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateField { entity, field } => {
                write!(f, "field `{field}` declared twice on entity `{entity}`")
            }
            Self::InvalidFieldName { entity, field } => write!(
                f,
                "field name `{field}` on entity `{entity}` is empty or contains `{PATH_DELIMITER}`"
            ),
        }
    }
}

impl Error for SchemaError {}

/// Statically declared field table for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    entity: &'static str,
    fields: Vec<FieldDescriptor>,
    defaults: SerializeOptions,
}

impl EntitySchema {
    pub fn builder(entity: &'static str) -> EntitySchemaBuilder {
        EntitySchemaBuilder {
            entity,
            fields: Vec::new(),
            defaults: SerializeOptions::default(),
        }
    }

    /// Entity name used in diagnostics.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Options applied when a caller does not supply its own.
    pub fn defaults(&self) -> &SerializeOptions {
        &self.defaults
    }
}

/// Registration-time builder for [`EntitySchema`].
#[derive(Debug, Clone)]
pub struct EntitySchemaBuilder {
    entity: &'static str,
    fields: Vec<FieldDescriptor>,
    defaults: SerializeOptions,
}

impl EntitySchemaBuilder {
    /// Appends one field; declaration order is preserved.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets per-type default whitelist/blacklist options.
    pub fn defaults(mut self, defaults: SerializeOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Validates the table and freezes it.
    ///
    /// # Errors
    /// - `InvalidFieldName` when a name is empty or contains the path delimiter.
    /// - `DuplicateField` when a name is declared twice.
    pub fn build(self) -> Result<EntitySchema, SchemaError> {
        for (index, field) in self.fields.iter().enumerate() {
            if field.name().is_empty() || field.name().contains(PATH_DELIMITER) {
                return Err(SchemaError::InvalidFieldName {
                    entity: self.entity,
                    field: field.name(),
                });
            }
            if self.fields[..index]
                .iter()
                .any(|earlier| earlier.name() == field.name())
            {
                return Err(SchemaError::DuplicateField {
                    entity: self.entity,
                    field: field.name(),
                });
            }
        }

        Ok(EntitySchema {
            entity: self.entity,
            fields: self.fields,
            defaults: self.defaults,
        })
    }
}
