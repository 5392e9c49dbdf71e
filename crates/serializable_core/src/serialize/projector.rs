//! Flat field projection for one record.

use super::error::SerializeResult;
use super::options::SerializeOptions;
use super::{Record, SerializedMap};

/// Projects `record`'s declared fields into a flat mapping.
///
/// Fields are visited in declaration order and filtered through
/// [`SerializeOptions::admits`]. Foreign keys are written under `<name>_id`
/// with their raw key value. Relations are not traversed.
///
/// # Errors
/// - `SchemaIntrospection` when the schema or a field value cannot be read.
pub fn project<R: Record + ?Sized>(
    record: &R,
    options: &SerializeOptions,
) -> SerializeResult<SerializedMap> {
    let schema = record.schema()?;
    let mut projected = SerializedMap::new();

    for field in schema.fields() {
        if !options.admits(field) {
            continue;
        }
        projected.insert(field.output_key(), record.field_value(field)?);
    }

    Ok(projected)
}
