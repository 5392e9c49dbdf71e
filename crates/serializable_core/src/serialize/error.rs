//! Error taxonomy for projection and relation traversal.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SerializeResult<T> = Result<T, SerializeError>;
pub type RelationResult<T> = Result<T, RelationError>;

/// Boxed persistence-layer failure carried through relation lookups.
pub type FetchError = Box<dyn Error + Send + Sync + 'static>;

/// Outcome of a failed relation lookup on one record.
#[derive(Debug)]
pub enum RelationError {
    /// The relation exists but has no target for this record.
    DoesNotExist,
    /// The record has no relation with the requested name.
    NoSuchAttribute,
    /// Loading the related data failed in the persistence layer.
    Fetch(FetchError),
}

impl Display for RelationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoesNotExist => write!(f, "related object does not exist"),
            Self::NoSuchAttribute => write!(f, "no such relation"),
            Self::Fetch(err) => write!(f, "failed to load relation: {err}"),
        }
    }
}

impl Error for RelationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Serialization failure surfaced to callers.
#[derive(Debug)]
pub enum SerializeError {
    /// Schema table or a declared field value could not be read.
    SchemaIntrospection {
        entity: &'static str,
        message: String,
    },
    /// Relation target exposes neither record nor collection serialization.
    TypeMismatch {
        entity: &'static str,
        relation: String,
        target: &'static str,
    },
    /// Persistence failure while resolving a relation.
    RelationFetch {
        entity: &'static str,
        relation: String,
        source: FetchError,
    },
}

impl SerializeError {
    /// Builds the error reported for a declared field a record cannot read.
    pub fn unreadable_field(entity: &'static str, field: &str) -> Self {
        Self::SchemaIntrospection {
            entity,
            message: format!("declared field `{field}` has no readable value"),
        }
    }
}

impl Display for SerializeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SchemaIntrospection { entity, message } => {
                write!(f, "cannot introspect `{entity}`: {message}")
            }
            Self::TypeMismatch {
                entity,
                relation,
                target,
            } => write!(
                f,
                "relation `{relation}` on `{entity}` resolves to non-serializable `{target}`"
            ),
            Self::RelationFetch {
                entity,
                relation,
                source,
            } => write!(f, "failed to load `{relation}` on `{entity}`: {source}"),
        }
    }
}

impl Error for SerializeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RelationFetch { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
