use bibman::{
    ast::{Biblio, Entry},
    cite, latex,
};

use eyre::eyre;
use log::trace;

use crate::interact::user_select;

/// Picks one entry out of a lookup result, asking the user when the lookup
/// returned more than one.
pub fn select_entry(mut entries: Vec<Entry>) -> eyre::Result<Entry> {
    match entries.len() {
        0 => Err(eyre!("Lookup did not return any entry")),
        1 => Ok(entries.remove(0)),
        _ => {
            let titles: Vec<String> = entries.iter().map(display_title).collect();
            let selection = user_select("Choose an entry", &titles)?;
            Ok(entries.remove(selection))
        }
    }
}

/// Gives an entry without a cite key one suggested from its fields.
pub fn ensure_cite(entry: Entry) -> Entry {
    if entry.cite.is_empty() {
        let suggested = cite::suggest(&entry);
        trace!("Entry has no cite key, suggesting '{suggested}'");
        entry.with_cite(suggested)
    } else {
        entry
    }
}

fn display_title(entry: &Entry) -> String {
    entry
        .title()
        .map_or_else(|| "No title".to_owned(), latex::decode)
}

pub fn check_entry_field_duplication(bib: &Biblio, name: &str, value: &str) -> eyre::Result<()> {
    trace!("Checking current bibliography for possible duplicate {name} of '{value}'");
    if bib.contains_field(name, |f| f == value) {
        Err(eyre!(
            "An entry already exists with a {} field with the value of '{}'.",
            name,
            value
        ))
    } else {
        trace!("No duplicate found!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_duplication_check() {
        let mut bib = Biblio::new(vec![]);
        let name = "doi";
        let doi = "10.1000/demo";

        assert!(check_entry_field_duplication(&bib, name, doi).is_ok());

        bib.insert(
            Entry::new("manual", "demo")
                .with_field("title", "test")
                .with_field(name, doi),
        );

        assert!(check_entry_field_duplication(&bib, name, doi).is_err());
    }

    #[test]
    fn ensure_cite_only_fills_empty_keys() {
        let entry = Entry::new("article", "")
            .with_field("author", "Smith, John")
            .with_field("year", "2023");

        assert_eq!("Smith2023", ensure_cite(entry).cite);

        let keyed = Entry::new("article", "kept").with_field("author", "Smith, John");
        assert_eq!("kept", ensure_cite(keyed).cite);
    }
}
