use super::Entry;

/// An in-memory bibliography, an ordered sequence of [`Entry`] values.
///
/// Entries keep their source order, parsing never reorders them. Duplicate
/// citation keys are allowed and preserved as separate entries since the
/// parser enforces no uniqueness invariant.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Biblio {
    dirty: bool,
    entries: Vec<Entry>,
}

impl Biblio {
    /// Create a new [`Biblio`] from a list of bibliography entries.
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            dirty: false,
            entries,
        }
    }

    /// Checks and resets the `dirty` flag.
    ///
    /// The `dirty` flag will return true when this instance has been edited
    /// since it was created. The default value of the `dirty` flag is `false`,
    /// therefore calling this function will always reset the `dirty` flag to
    /// `false`.
    pub fn dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    /// Marks the bibliography as edited so the next [`Self::dirty`] check
    /// reports it.
    ///
    /// Useful when the in-memory model is unchanged but its textual form
    /// should be rewritten, such as normalizing a file to canonical form.
    pub fn touch(&mut self) {
        self.dirty = true;
    }

    /// Append a new [`Entry`] to the end of the bibliography.
    pub fn insert(&mut self, entry: Entry) {
        self.dirty = true;
        self.entries.push(entry);
    }

    /// Remove every entry with this citation key, compared case-insensitively.
    ///
    /// Returns `true` when at least one entry was removed.
    pub fn remove(&mut self, cite: &str) -> bool {
        let mut removed = false;
        self.entries.retain(|e| {
            let keep = !e.cite.eq_ignore_ascii_case(cite);
            removed |= !keep;
            keep
        });

        self.dirty |= removed;
        removed
    }

    /// Replace the first entry matching `cite` with a new value, keeping its
    /// position in the sequence.
    ///
    /// Edits are whole-entry replacements so concurrent readers of the old
    /// value never observe a partial write. Returns `false` and leaves the
    /// bibliography untouched when no entry matches.
    pub fn replace(&mut self, cite: &str, entry: Entry) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| e.cite.eq_ignore_ascii_case(cite))
        {
            Some(slot) => {
                *slot = entry;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Returns a reference to the first entry with this citation key.
    #[must_use]
    pub fn get(&self, cite: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.cite.eq_ignore_ascii_case(cite))
    }

    /// An iterator over the entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Consumes the bibliography and returns its entries in source order.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Tests if any field in this [`Biblio`] matches a predicate.
    ///
    /// Applies the closure to the value of the `key` field of each entry and
    /// returns `true` as soon as one of them matches. An empty [`Biblio`]
    /// always returns `false`.
    pub fn contains_field<P>(&self, key: &str, predicate: P) -> bool
    where
        P: Fn(&str) -> bool,
    {
        self.entries
            .iter()
            .any(|e| e.get_field(key).map(&predicate).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_entry(cite: &str) -> Entry {
        Entry::new("manual", cite).with_field("title", "Title")
    }

    #[test]
    fn insertion_of_entry_makes_biblio_dirty() {
        let mut biblio = Biblio::default();

        assert!(!biblio.dirty(), "Biblio::default should be clean");

        biblio.insert(manual_entry("cite"));

        assert!(
            biblio.dirty(),
            "After insertion of an entry the Biblio should be dirty"
        );
        assert!(
            !biblio.dirty(),
            "After calling Biblio::dirty the flag is reset so this second call \
                to the function should return false"
        );
    }

    #[test]
    fn dirty_flag_should_not_be_effected_when_nothing_is_removed() {
        let mut biblio = Biblio::default();

        assert!(
            !biblio.remove("this doesn't exist!"),
            "The Biblio is empty so nothing can be removed"
        );
        assert!(
            !biblio.dirty(),
            "Nothing was removed so the dirty flag should still be false"
        );
    }

    #[test]
    fn remove_entry_is_case_insensitive() {
        let mut biblio = Biblio::new(vec![manual_entry("Cite")]);

        assert!(biblio.remove("cite"), "Should remove the only entry");
        assert!(biblio.dirty());
        assert!(
            biblio.into_entries().is_empty(),
            "The only entry should have been removed"
        );
    }

    #[test]
    fn entries_keep_their_source_order() {
        let biblio = Biblio::new(vec![manual_entry("b"), manual_entry("a")]);

        let cites: Vec<_> = biblio.entries().map(|e| e.cite.as_str()).collect();
        assert_eq!(vec!["b", "a"], cites);
    }

    #[test]
    fn duplicate_cites_are_preserved_as_separate_entries() {
        let mut biblio = Biblio::new(vec![manual_entry("dup"), manual_entry("dup")]);

        assert_eq!(2, biblio.entries().count());
        assert!(biblio.remove("dup"));
        assert!(biblio.into_entries().is_empty(), "remove takes every match");
    }

    #[test]
    fn replace_swaps_the_whole_entry_in_place() {
        let mut biblio = Biblio::new(vec![manual_entry("first"), manual_entry("second")]);

        let edited = manual_entry("first").with_field("year", "2024");
        assert!(biblio.replace("first", edited));
        assert!(biblio.dirty());

        let entry = biblio.get("first").expect("entry should still exist");
        assert_eq!(Some("2024"), entry.get_field("year"));

        let cites: Vec<_> = biblio.entries().map(|e| e.cite.as_str()).collect();
        assert_eq!(vec!["first", "second"], cites, "order is preserved");
    }

    #[test]
    fn false_on_duplicate_field() {
        let entry = manual_entry("Edelkamp_2019").with_field("doi", "test");
        let references = Biblio::new(vec![entry]);

        assert!(references.contains_field("doi", |f| f == "test"));
        assert!(!references.contains_field("doi", |f| f == "something else"));
    }
}
