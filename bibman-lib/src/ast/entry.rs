use std::collections::BTreeMap;

/// A single bibliographic record.
///
/// An `Entry` is an immutable value: the parser creates them and callers that
/// want to "edit" one produce a replacement with [`Entry::with_field`] or
/// [`Entry::with_cite`] rather than mutating shared state.
///
/// Field names are lowercased when the entry is created from source text, so
/// `Title` and `TITLE` address the same field and the last occurrence wins.
/// Field values keep the text exactly as written between the delimiters,
/// including any inner `{}` groups used for case protection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Citation key of the entry.
    ///
    /// Unique within a document by convention only, duplicates are preserved
    /// as separate entries.
    pub cite: String,

    /// The kind of record (`article`, `book`, ...) as written in the source.
    pub kind: String,

    /// Field values keyed by lowercased field name.
    ///
    /// A [`BTreeMap`] keeps no source order, which also gives the serializer
    /// its lexicographic field order for free.
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    /// Creates an entry of the given kind with no fields.
    #[must_use]
    pub fn new<K, C>(kind: K, cite: C) -> Self
    where
        K: Into<String>,
        C: Into<String>,
    {
        Self {
            cite: cite.into(),
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Searches for a field value that matches the `name` given.
    ///
    /// The `name` is matched case-insensitively against the lowercased field
    /// names of the entry.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Returns the `title` field value of this entry, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get_field("title")
    }

    /// Returns a copy of this entry with the field set to `value`.
    ///
    /// The field name is lowercased, replacing any existing value stored
    /// under the same normalized name.
    #[must_use]
    pub fn with_field<N, V>(mut self, name: N, value: V) -> Self
    where
        N: AsRef<str>,
        V: Into<String>,
    {
        self.fields
            .insert(name.as_ref().to_lowercase(), value.into());
        self
    }

    /// Returns a copy of this entry with a new citation key.
    #[must_use]
    pub fn with_cite<C: Into<String>>(mut self, cite: C) -> Self {
        self.cite = cite.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_normalized_to_lowercase() {
        let entry = Entry::new("article", "cite").with_field("Title", "A Title");

        assert_eq!(Some("A Title"), entry.get_field("title"));
        assert_eq!(Some("A Title"), entry.get_field("TITLE"));
    }

    #[test]
    fn with_field_replaces_case_insensitive_duplicates() {
        let entry = Entry::new("article", "cite")
            .with_field("title", "first")
            .with_field("TITLE", "second");

        assert_eq!(1, entry.fields.len());
        assert_eq!(Some("second"), entry.title());
    }

    #[test]
    fn with_cite_replaces_citation_key() {
        let entry = Entry::new("book", "old").with_cite("new");
        assert_eq!("new", entry.cite);
    }
}
