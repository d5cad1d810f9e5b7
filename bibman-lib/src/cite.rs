//! Citation key suggestion from entry fields.
//!
//! A suggested key is the first author's last name joined with the year, the
//! usual `smith2023` convention. The suggestion is only a starting point, the
//! caller decides whether to use it and nothing here enforces uniqueness
//! across a bibliography.

use crate::{ast::Entry, latex};

/// Suggests a citation key for an entry from its `author` and `year` fields.
///
/// Accents are normalized to their Unicode characters and anything that is
/// not alphanumeric is dropped from the name. Falls back to `Unknown` when
/// the entry has no author.
#[must_use]
pub fn suggest(entry: &Entry) -> String {
    let author = entry
        .get_field("author")
        .map_or_else(|| "Unknown".to_owned(), first_author_last_name);

    let year = entry.get_field("year").unwrap_or_default();

    format!("{author}{year}")
}

/// The last name of the first author in a BibTeX `author` field.
///
/// Authors are separated by ` and `, a single author is either written as
/// `Last, First` or `First Last`.
fn first_author_last_name(field: &str) -> String {
    let first_author = field.split(" and ").next().unwrap_or(field);

    let last_name = if let Some((last, _)) = first_author.split_once(',') {
        last
    } else {
        first_author.split_whitespace().last().unwrap_or("")
    };

    let cleaned: String = latex::decode(last_name)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();

    if cleaned.is_empty() {
        "Unknown".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_comma_first_author_format() {
        let entry = Entry::new("article", "")
            .with_field("author", "Smith, John and Doe, Jane")
            .with_field("year", "2023");

        assert_eq!("Smith2023", suggest(&entry));
    }

    #[test]
    fn first_last_author_format() {
        let entry = Entry::new("article", "")
            .with_field("author", "John Smith")
            .with_field("year", "2023");

        assert_eq!("Smith2023", suggest(&entry));
    }

    #[test]
    fn accented_names_are_normalized() {
        let entry = Entry::new("article", "")
            .with_field("author", "M\\\"{u}ller, Heinz")
            .with_field("year", "1999");

        assert_eq!("Müller1999", suggest(&entry));
    }

    #[test]
    fn braces_in_names_are_dropped() {
        let entry = Entry::new("article", "").with_field("author", "{van Rossum}, Guido");

        assert_eq!("vanRossum", suggest(&entry));
    }

    #[test]
    fn missing_author_falls_back_to_unknown() {
        let entry = Entry::new("misc", "").with_field("year", "2020");

        assert_eq!("Unknown2020", suggest(&entry));
    }

    #[test]
    fn missing_year_leaves_just_the_name() {
        let entry = Entry::new("misc", "").with_field("author", "Knuth, Donald");

        assert_eq!("Knuth", suggest(&entry));
    }
}
