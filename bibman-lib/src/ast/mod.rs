//! Structs for representing a bibliography and its entries independent of any
//! textual end format.

mod biblio;
mod entry;

pub use biblio::Biblio;
pub use entry::Entry;
