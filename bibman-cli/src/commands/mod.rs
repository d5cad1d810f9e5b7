mod add;

use crate::interact;
use add::AddCommands;

use bibman::{ast::Biblio, cite};

use clap::Subcommand;
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Add an entry to the current bibliography file from a metadata lookup
    #[clap(arg_required_else_help = true)]
    Add {
        #[clap(subcommand)]
        command: AddCommands,
    },

    /// Rewrite the bibliography file in canonical form
    ///
    /// Entries keep their order, fields are sorted by name and every value is
    /// normalized to the braced form.
    Fmt,

    /// Add a new entry manually
    ///
    /// Prompts for the common fields and then for any extra fields. When no
    /// cite key is given one is suggested from the author and year fields.
    #[clap(arg_required_else_help = true)]
    New {
        /// The kind of the entry to add (article, book, misc, ...)
        kind: String,
        /// Cite key to use for the new entry
        cite: Option<String>,
    },

    /// Remove an entry from the bibliography file using the cite key
    #[clap(arg_required_else_help = true)]
    Rm {
        /// The cite key of the entry to remove
        cite: String,
    },
}

impl Commands {
    pub fn execute(self, biblio: &mut Biblio) -> eyre::Result<String> {
        match self {
            Commands::Add { command } => command.execute(biblio),
            Commands::Fmt => {
                biblio.touch();
                Ok("Bibliography rewritten in canonical form".to_owned())
            }
            Commands::New { kind, cite } => {
                let entry = interact::user_compose_entry(&kind)?;
                let entry = match cite {
                    Some(cite) => entry.with_cite(cite),
                    None => {
                        let suggested = cite::suggest(&entry);
                        trace!("No cite key given, suggesting '{suggested}'");
                        entry.with_cite(suggested)
                    }
                };
                let cite = entry.cite.clone();
                biblio.insert(entry);
                Ok(format!("New entry added to bibliography with cite '{cite}'"))
            }
            Commands::Rm { cite } => {
                trace!("Checking current bibliography for entry with this cite key..");
                if biblio.remove(&cite) {
                    Ok("Entry removed from bibliography".to_owned())
                } else {
                    Ok(format!("No entry found with the cite key of '{cite}'"))
                }
            }
        }
    }
}
