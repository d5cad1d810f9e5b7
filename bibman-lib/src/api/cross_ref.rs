use serde::Deserialize;

use crate::{ast::Biblio, format::BibTex, Error, ErrorKind};

use super::{format_api, Client};

/// Number of work stubs requested from a free-text search.
const SEARCH_ROWS: usize = 5;

#[inline]
pub(crate) fn get_entry_by_doi<C: Client>(doi: &str) -> Result<Biblio, Error> {
    let doi = normalize_doi(doi);
    let url = format!("https://api.crossref.org/works/{doi}/transform/application/x-bibtex");
    format_api::get_entries_by_url::<C, BibTex>(&url)
}

/// Strips the URL or `doi:` prefix a user is likely to paste along with the DOI.
fn normalize_doi(doi: &str) -> &str {
    let doi = doi.trim();
    doi.strip_prefix("https://doi.org/")
        .or_else(|| doi.strip_prefix("doi:"))
        .unwrap_or(doi)
}

#[derive(Deserialize)]
struct QueryResult {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    items: Vec<EntryStub>,
}

#[derive(Deserialize)]
struct EntryStub {
    #[serde(rename = "DOI")]
    doi: String,
    title: Vec<String>,
}

impl EntryStub {
    fn into_tuple(mut self) -> (String, String) {
        let title = if self.title.is_empty() {
            "No title".to_owned()
        } else {
            self.title.remove(0)
        };

        (self.doi, title)
    }
}

pub(crate) fn get_entry_stubs_by_query<C: Client>(
    query: &str,
) -> Result<Vec<(String, String)>, Error> {
    let url = format!(
        "https://api.crossref.org/works?query.bibliographic={query}&rows={SEARCH_ROWS}&select=DOI,title"
    );
    let client = C::default();

    let query_result: QueryResult = client.get_json(&url)?;
    let items = query_result.message.items;
    if items.is_empty() {
        Err(Error::new(
            ErrorKind::NoValue,
            format!("No works found matching '{query}'"),
        ))
    } else {
        Ok(items.into_iter().map(EntryStub::into_tuple).collect())
    }
}
