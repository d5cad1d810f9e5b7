use crate::{app, interact};

use bibman::ast::Biblio;

use clap::Subcommand;
use eyre::Context;
use log::trace;

#[derive(Subcommand)]
pub enum AddCommands {
    /// Add an entry using its DOI
    #[clap(arg_required_else_help = true)]
    Doi {
        /// The DOI, with or without a doi: or https://doi.org/ prefix
        doi: String,
    },
    /// Search for an entry by title or author text and pick one to add
    #[clap(arg_required_else_help = true)]
    Title {
        /// Free text to search for, usually the title of the work
        title: String,
    },
}

impl AddCommands {
    pub fn execute(self, biblio: &mut Biblio) -> eyre::Result<String> {
        match self {
            AddCommands::Doi { doi } => {
                app::check_entry_field_duplication(biblio, "doi", &doi)?;
                add_by_doi(biblio, &doi)
            }
            AddCommands::Title { title } => {
                trace!("Searching for works matching '{title}'");
                let stubs = bibman::entry_stubs_by_query(&title)
                    .wrap_err("Cannot find any entry matching this text")?;

                let titles: Vec<&str> = stubs.iter().map(|(_, title)| title.as_str()).collect();
                let selection = interact::user_select("Confirm entry", &titles)?;
                let (doi, _) = &stubs[selection];

                app::check_entry_field_duplication(biblio, "doi", doi)?;
                add_by_doi(biblio, doi)
            }
        }
    }
}

fn add_by_doi(biblio: &mut Biblio, doi: &str) -> eyre::Result<String> {
    trace!("Fetching BibTeX entry for doi '{doi}'");
    let entries = bibman::entry_by_doi(doi)
        .wrap_err("Cannot create a valid entry for this doi")?
        .into_entries();

    let entry = app::select_entry(entries)?;
    let entry = app::ensure_cite(entry);

    let cite = entry.cite.clone();
    biblio.insert(entry);
    Ok(format!("Entry added to bibliography with cite '{cite}'"))
}
