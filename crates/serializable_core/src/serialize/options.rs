//! Per-call field selection options.

use crate::schema::FieldDescriptor;
use std::collections::BTreeSet;

/// Field selection policy applied by the projector.
///
/// An empty `fields` set behaves like no whitelist at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    fields: Option<BTreeSet<String>>,
    exclude: Option<BTreeSet<String>>,
    editable_only: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            fields: None,
            exclude: None,
            editable_only: true,
        }
    }
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts projection to the given field names.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Drops the given field names from projection.
    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(exclude.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_editable_only(mut self, editable_only: bool) -> Self {
        self.editable_only = editable_only;
        self
    }

    pub fn fields(&self) -> Option<&BTreeSet<String>> {
        self.fields.as_ref()
    }

    pub fn exclude(&self) -> Option<&BTreeSet<String>> {
        self.exclude.as_ref()
    }

    pub fn editable_only(&self) -> bool {
        self.editable_only
    }

    /// Fills unset lists from `defaults`; caller-provided lists always win.
    pub fn or_defaults(&self, defaults: &SerializeOptions) -> SerializeOptions {
        SerializeOptions {
            fields: self.fields.clone().or_else(|| defaults.fields.clone()),
            exclude: self.exclude.clone().or_else(|| defaults.exclude.clone()),
            editable_only: self.editable_only,
        }
    }

    /// Applies the projection policy to one field.
    ///
    /// Checks run in a fixed order: editability, whitelist, blacklist.
    pub fn admits(&self, field: &FieldDescriptor) -> bool {
        if self.editable_only && !field.is_editable() {
            return false;
        }
        if let Some(fields) = self.fields.as_ref() {
            if !fields.is_empty() && !fields.contains(field.name()) {
                return false;
            }
        }
        if let Some(exclude) = self.exclude.as_ref() {
            if exclude.contains(field.name()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::SerializeOptions;
    use crate::schema::FieldDescriptor;

    #[test]
    fn default_admits_editable_fields_only() {
        let options = SerializeOptions::default();
        assert!(options.editable_only());
        assert!(options.admits(&FieldDescriptor::scalar("text")));
        assert!(!options.admits(&FieldDescriptor::scalar("created_at").non_editable()));

        let all = options.with_editable_only(false);
        assert!(all.admits(&FieldDescriptor::scalar("created_at").non_editable()));
    }

    #[test]
    fn empty_whitelist_admits_everything() {
        let options = SerializeOptions::new().with_fields(Vec::<String>::new());
        assert!(options.admits(&FieldDescriptor::scalar("name")));
    }

    #[test]
    fn exclude_wins_over_whitelist() {
        let options = SerializeOptions::new()
            .with_fields(["name", "email"])
            .with_exclude(["email"]);
        assert!(options.admits(&FieldDescriptor::scalar("name")));
        assert!(!options.admits(&FieldDescriptor::scalar("email")));
        assert!(!options.admits(&FieldDescriptor::scalar("id")));
    }

    #[test]
    fn or_defaults_prefers_caller_lists() {
        let defaults = SerializeOptions::new()
            .with_fields(["name"])
            .with_exclude(["user"]);
        let caller = SerializeOptions::new().with_fields(["email"]);

        let merged = caller.or_defaults(&defaults);
        assert!(merged.fields().unwrap().contains("email"));
        assert!(!merged.fields().unwrap().contains("name"));
        assert!(merged.exclude().unwrap().contains("user"));
    }
}
