use bibman::ast::Entry;

use dialoguer::Input;
use eyre::{eyre, Context, Result};

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<usize> {
    let selection = dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    if let Some(index) = selection {
        Ok(index)
    } else {
        Err(eyre!("No selection made - cancelling operation"))
    }
}

pub fn user_input(prompt: String) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

fn user_input_allow_empty(prompt: String) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

/// Builds a new entry of the given kind from user input.
///
/// The common fields are prompted for first and can be skipped, after that
/// any number of extra fields can be entered until an empty field name ends
/// the entry.
pub fn user_compose_entry(kind: &str) -> Result<Entry> {
    let mut entry = Entry::new(kind, String::new());

    for name in ["title", "author", "year"] {
        let value =
            user_input_allow_empty(format!("Enter value for the {name} field (empty to skip)"))?;
        if !value.trim().is_empty() {
            entry = entry.with_field(name, value.trim());
        }
    }

    loop {
        let name =
            user_input_allow_empty("Enter an extra field name (empty to finish)".to_owned())?;
        let name = name.trim();
        if name.is_empty() {
            break;
        }

        let value = user_input(format!("Enter value for the {name} field"))?;
        entry = entry.with_field(name, value.trim());
    }

    Ok(entry)
}
