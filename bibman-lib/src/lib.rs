#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bibman
//!
//! bibman is a library for working with BibTeX bibliographies: it parses
//! BibTeX documents into an in-memory [`ast::Biblio`] model, composes the
//! model back into canonical BibTeX text, and supports looking up entries
//! from the CrossRef metadata API.
//!
//! The parser is deliberately tolerant. Hand-edited `.bib` files are full of
//! stray text and half-finished records, so parsing is total: any input
//! yields a (possibly empty) sequence of entries and malformed fragments are
//! skipped or recovered best-effort, never turned into an error that loses
//! the valid entries around them.

mod api;
pub mod ast;
pub mod cite;
mod error;
#[cfg(feature = "file")]
pub mod file;
pub mod format;
pub mod latex;

use ast::Biblio;
pub use error::{Error, ErrorKind};

use format::Format;
use log::trace;

type Client = reqwest::blocking::Client;

/// Fetch the bibliographic entry for a `doi` from the default API.
///
/// The `doi` may be given bare, with a `doi:` prefix, or as a full
/// `https://doi.org/` URL. Fetching by DOI should return a single entry but
/// a [`Biblio`] is used to provide a consistent API across all lookup
/// functions.
///
/// # Errors
///
/// An [`Err`] is returned when the request fails or when the response does
/// not contain any entry for the `doi`.
#[inline]
pub fn entry_by_doi(doi: &str) -> Result<Biblio, Error> {
    trace!("Fetch entry by doi of '{doi}'");
    api::cross_ref::get_entry_by_doi::<Client>(doi)
}

/// Search the default API for works matching a free-text bibliographic query.
///
/// Returns a list of `(doi, title)` stubs to choose from, suitable for a
/// follow-up [`entry_by_doi`] call on the selected stub.
///
/// # Errors
///
/// An [`Err`] is returned when the request fails or when no work matches the
/// query.
#[inline]
pub fn entry_stubs_by_query(query: &str) -> Result<Vec<(String, String)>, Error> {
    trace!("Search entry stubs with a query of '{query}'");
    api::cross_ref::get_entry_stubs_by_query::<Client>(query)
}

/// Fetch bibliographic entries from a `url` serving text in the `F: Format`
/// used when calling this function.
///
/// # Errors
///
/// An [`Err`] is returned when the request fails, when the response text
/// cannot be parsed as `F`, or when it parses to an empty bibliography.
#[inline]
pub fn entries_by_url<F: Format>(url: &str) -> Result<Biblio, Error> {
    trace!("Fetch entries at url of '{url}'");
    api::format_api::get_entries_by_url::<Client, F>(url)
}
