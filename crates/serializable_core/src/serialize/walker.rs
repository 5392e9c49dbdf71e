//! Relation traversal on top of field projection.
//!
//! # Invariants
//! - Specs sharing an immediate relation are resolved with one recursive call.
//! - The resulting key set depends only on which relations were named.
//! - `DoesNotExist` and `NoSuchAttribute` omit the key; everything else fails.

use super::error::{RelationError, SerializeError, SerializeResult};
use super::options::SerializeOptions;
use super::path::{group_path_specs, PathGroup};
use super::projector::project;
use super::{Record, Related, SerializedMap};
use log::{debug, trace};
use serde_json::Value;

/// Serializes `record` with its type defaults, traversing `path_specs`.
///
/// Equivalent to [`serialize_with`] with [`SerializeOptions::default`].
pub fn serialize<R: Record + ?Sized>(
    record: &R,
    path_specs: &[&str],
) -> SerializeResult<SerializedMap> {
    serialize_with(record, path_specs, &SerializeOptions::default())
}

/// Serializes `record` with caller options, traversing `path_specs`.
///
/// Lists left unset in `options` fall back to the entity's registered
/// defaults. Related records are serialized with their own defaults.
///
/// # Errors
/// - `SchemaIntrospection` when projection fails at any level.
/// - `TypeMismatch` when a named relation has no serialization contract.
/// - `RelationFetch` when loading a relation fails in storage.
pub fn serialize_with<R: Record + ?Sized>(
    record: &R,
    path_specs: &[&str],
    options: &SerializeOptions,
) -> SerializeResult<SerializedMap> {
    let schema = record.schema()?;
    let effective = options.or_defaults(schema.defaults());
    let mut serialized = project(record, &effective)?;

    for group in group_path_specs(path_specs) {
        if let Some(value) = traverse(record, schema.entity(), &group)? {
            serialized.insert(group.head().to_string(), value);
        }
    }

    Ok(serialized)
}

fn traverse<R: Record + ?Sized>(
    record: &R,
    entity: &'static str,
    group: &PathGroup<'_>,
) -> SerializeResult<Option<Value>> {
    let related = match record.relation(group.head()) {
        Ok(related) => related,
        Err(RelationError::DoesNotExist) => {
            trace!(
                "event=relation_skipped module=serialize reason=does_not_exist entity={} relation={}",
                entity,
                group.head()
            );
            return Ok(None);
        }
        Err(RelationError::NoSuchAttribute) => {
            // Typos land here too; the key is still omitted.
            debug!(
                "event=relation_skipped module=serialize reason=unknown_attribute entity={} relation={}",
                entity,
                group.head()
            );
            return Ok(None);
        }
        Err(RelationError::Fetch(source)) => {
            return Err(SerializeError::RelationFetch {
                entity,
                relation: group.head().to_string(),
                source,
            });
        }
    };

    let value = match related {
        Related::Single(target) => Value::Object(target.serialize(group.joins())?),
        Related::Collection(target) => Value::Array(
            target
                .serialize_all(group.joins())?
                .into_iter()
                .map(Value::Object)
                .collect(),
        ),
        Related::Opaque { type_name } => {
            return Err(SerializeError::TypeMismatch {
                entity,
                relation: group.head().to_string(),
                target: type_name,
            });
        }
    };

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::{serialize, serialize_with};
    use crate::schema::{EntitySchema, FieldDescriptor};
    use crate::serialize::{
        CollectionSerializable, Record, RecordSet, Related, RelationError, RelationResult,
        SerializeError, SerializeOptions, SerializeResult,
    };
    use once_cell::sync::Lazy;
    use serde_json::{json, Value};
    use std::io;

    static AUTHOR_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
        EntitySchema::builder("author")
            .field(FieldDescriptor::scalar("id"))
            .field(FieldDescriptor::scalar("name"))
            .field(FieldDescriptor::scalar("royalty_rate"))
            .field(FieldDescriptor::scalar("synced_at").non_editable())
            .defaults(SerializeOptions::new().with_exclude(["royalty_rate"]))
            .build()
            .expect("valid author schema")
    });

    static BOOK_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
        EntitySchema::builder("book")
            .field(FieldDescriptor::scalar("id"))
            .field(FieldDescriptor::foreign_key("author", "author"))
            .field(FieldDescriptor::scalar("title"))
            .build()
            .expect("valid book schema")
    });

    static TAG_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
        EntitySchema::builder("tag")
            .field(FieldDescriptor::scalar("label"))
            .build()
            .expect("valid tag schema")
    });

    struct Tag {
        label: &'static str,
    }

    struct Book {
        id: i64,
        author_id: i64,
        title: &'static str,
        tags: Vec<Tag>,
        editor: Option<Author>,
    }

    struct Author {
        id: i64,
        name: &'static str,
        royalty_rate: f64,
        synced_at: i64,
        books: Vec<Book>,
        storage_offline: bool,
    }

    impl Record for Tag {
        fn schema(&self) -> SerializeResult<&EntitySchema> {
            Ok(&*TAG_SCHEMA)
        }

        fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value> {
            match field.name() {
                "label" => Ok(Value::from(self.label)),
                other => Err(SerializeError::unreadable_field("tag", other)),
            }
        }

        fn relation(&self, _name: &str) -> RelationResult<Related<'_>> {
            Err(RelationError::NoSuchAttribute)
        }
    }

    impl Record for Book {
        fn schema(&self) -> SerializeResult<&EntitySchema> {
            Ok(&*BOOK_SCHEMA)
        }

        fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value> {
            match field.name() {
                "id" => Ok(Value::from(self.id)),
                "author" => Ok(Value::from(self.author_id)),
                "title" => Ok(Value::from(self.title)),
                other => Err(SerializeError::unreadable_field("book", other)),
            }
        }

        fn relation(&self, name: &str) -> RelationResult<Related<'_>> {
            match name {
                "tags" => Ok(Related::collection(RecordSet::new(
                    self.tags.iter().collect::<Vec<_>>(),
                ))),
                "editor" => self
                    .editor
                    .as_ref()
                    .map(Related::single)
                    .ok_or(RelationError::DoesNotExist),
                _ => Err(RelationError::NoSuchAttribute),
            }
        }
    }

    impl Record for Author {
        fn schema(&self) -> SerializeResult<&EntitySchema> {
            Ok(&*AUTHOR_SCHEMA)
        }

        fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value> {
            match field.name() {
                "id" => Ok(Value::from(self.id)),
                "name" => Ok(Value::from(self.name)),
                "royalty_rate" => Ok(Value::from(self.royalty_rate)),
                "synced_at" => Ok(Value::from(self.synced_at)),
                other => Err(SerializeError::unreadable_field("author", other)),
            }
        }

        fn relation(&self, name: &str) -> RelationResult<Related<'_>> {
            match name {
                "books" => Ok(Related::collection(RecordSet::new(
                    self.books.iter().collect::<Vec<_>>(),
                ))),
                "portrait" => Ok(Related::Opaque { type_name: "bytes" }),
                "reviews" if self.storage_offline => Err(RelationError::Fetch(Box::new(
                    io::Error::new(io::ErrorKind::NotConnected, "storage offline"),
                ))),
                "reviews" => Ok(Related::collection(RecordSet::<Tag>::default())),
                _ => Err(RelationError::NoSuchAttribute),
            }
        }
    }

    fn editor() -> Author {
        Author {
            id: 7,
            name: "Ed",
            royalty_rate: 0.0,
            synced_at: 0,
            books: Vec::new(),
            storage_offline: false,
        }
    }

    fn author() -> Author {
        Author {
            id: 1,
            name: "Ursula",
            royalty_rate: 0.15,
            synced_at: 1_700_000_000_000,
            books: vec![
                Book {
                    id: 10,
                    author_id: 1,
                    title: "Earthsea",
                    tags: vec![Tag { label: "fantasy" }, Tag { label: "classic" }],
                    editor: Some(editor()),
                },
                Book {
                    id: 11,
                    author_id: 1,
                    title: "The Dispossessed",
                    tags: vec![Tag { label: "sf" }],
                    editor: None,
                },
            ],
            storage_offline: false,
        }
    }

    #[test]
    fn no_paths_returns_projection_with_type_defaults() {
        let serialized = serialize(&author(), &[]).unwrap();
        assert_eq!(
            Value::Object(serialized),
            json!({"id": 1, "name": "Ursula"})
        );
    }

    #[test]
    fn caller_options_override_type_defaults() {
        let options = SerializeOptions::new()
            .with_exclude(["name"])
            .with_editable_only(false);
        let serialized = serialize_with(&author(), &[], &options).unwrap();
        assert_eq!(
            Value::Object(serialized),
            json!({"id": 1, "royalty_rate": 0.15, "synced_at": 1_700_000_000_000_i64})
        );
    }

    #[test]
    fn collection_relation_nests_ordered_array() {
        let serialized = serialize(&author(), &["books"]).unwrap();
        assert_eq!(
            serialized["books"],
            json!([
                {"id": 10, "author_id": 1, "title": "Earthsea"},
                {"id": 11, "author_id": 1, "title": "The Dispossessed"}
            ])
        );
    }

    #[test]
    fn shared_head_specs_merge_into_one_recursive_call() {
        let author = author();
        let merged = serialize(&author, &["books__tags", "books__editor"]).unwrap();

        let books = RecordSet::new(author.books.iter().collect::<Vec<_>>());
        let direct = books.serialize_all(&["tags", "editor"]).unwrap();
        assert_eq!(
            merged["books"],
            Value::Array(direct.into_iter().map(Value::Object).collect())
        );
        assert_eq!(merged["books"][0]["tags"][1]["label"], "classic");
        assert_eq!(merged["books"][0]["editor"]["name"], "Ed");
        assert!(merged["books"][1].get("editor").is_none());
    }

    #[test]
    fn path_order_does_not_change_output() {
        let author = author();
        let forward = serialize(&author, &["books__tags", "books__editor", "nope"]).unwrap();
        let backward = serialize(&author, &["nope", "books__editor", "books__tags"]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn unknown_and_scalar_names_are_omitted() {
        let serialized = serialize(&author(), &["boooks", "name", "books__nope"]).unwrap();
        assert!(serialized.get("boooks").is_none());
        assert_eq!(serialized["name"], "Ursula");
        assert_eq!(serialized["books"][0]["title"], "Earthsea");
        assert!(serialized["books"][0].get("nope").is_none());
    }

    #[test]
    fn opaque_relation_is_a_type_mismatch() {
        let err = serialize(&author(), &["portrait"]).unwrap_err();
        assert!(matches!(
            err,
            SerializeError::TypeMismatch {
                entity: "author",
                target: "bytes",
                ..
            }
        ));
    }

    #[test]
    fn fetch_failure_propagates() {
        let mut offline = author();
        offline.storage_offline = true;

        let err = serialize(&offline, &["reviews"]).unwrap_err();
        assert!(matches!(err, SerializeError::RelationFetch { .. }));
        assert!(err.to_string().contains("storage offline"));
        assert!(std::error::Error::source(&err).is_some());

        let empty = serialize(&author(), &["reviews"]).unwrap();
        assert_eq!(empty["reviews"], json!([]));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let author = author();
        let first = serialize(&author, &["books__tags"]).unwrap();
        let second = serialize(&author, &["books__tags"]).unwrap();
        assert_eq!(first, second);
    }
}
