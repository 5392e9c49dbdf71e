//! Field descriptors for statically declared entity schemas.

/// Suffix appended to foreign-key field names in projected output.
///
/// Mirrors the flat `.values()`-style convention: `user` -> `user_id`.
pub const FOREIGN_KEY_SUFFIX: &str = "_id";

/// Storage category of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain column value projected under the field name.
    Scalar,
    /// Column holding the key of a row in `target`.
    ForeignKey { target: &'static str },
}

/// One entry of an entity's field table.
///
/// Descriptors are declared once per entity type and never change at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
    editable: bool,
}

impl FieldDescriptor {
    /// Declares an editable scalar field.
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar,
            editable: true,
        }
    }

    /// Declares an editable foreign-key field referencing `target`.
    pub const fn foreign_key(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::ForeignKey { target },
            editable: true,
        }
    }

    /// Marks the field as store-managed (hidden when projecting editable-only).
    pub const fn non_editable(self) -> Self {
        Self {
            editable: false,
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self.kind, FieldKind::ForeignKey { .. })
    }

    /// Returns the key this field is written under in a projection.
    pub fn output_key(&self) -> String {
        match self.kind {
            FieldKind::Scalar => self.name.to_string(),
            FieldKind::ForeignKey { .. } => format!("{}{FOREIGN_KEY_SUFFIX}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldDescriptor, FieldKind};

    #[test]
    fn foreign_key_output_key_is_suffixed() {
        let field = FieldDescriptor::foreign_key("user", "user");
        assert!(field.is_foreign_key());
        assert_eq!(field.kind(), FieldKind::ForeignKey { target: "user" });
        assert_eq!(field.output_key(), "user_id");
    }

    #[test]
    fn scalar_output_key_is_name() {
        let field = FieldDescriptor::scalar("text");
        assert!(!field.is_foreign_key());
        assert_eq!(field.output_key(), "text");
    }

    #[test]
    fn non_editable_keeps_name_and_kind() {
        let field = FieldDescriptor::scalar("created_at").non_editable();
        assert!(!field.is_editable());
        assert_eq!(field.name(), "created_at");
        assert_eq!(field.kind(), FieldKind::Scalar);
    }
}
