//! One builder per artifact kind. Each picks a destination, drives the
//! property reader and writes exactly one file, or nothing on failure.

pub mod api;
pub mod model;
pub mod schema;

pub use api::ApiBuilder;
pub use model::ModelBuilder;
pub use schema::SchemaBuilder;

use crate::error::Result;
use crate::prompt::Prompter;
use crate::validate;

/// Asks for names until a blank line. Names must be unique identifiers.
pub fn collect_names(prompter: &mut dyn Prompter, label: &str) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    loop {
        let check = |input: &str| validate::new_name(input, &names);
        let name = prompter.input(&format!("{} (leave blank to finish)", label), Some(&check))?;
        if name.is_empty() {
            return Ok(names);
        }
        names.push(name);
    }
}

pub fn read_file_name(prompter: &mut dyn Prompter, what: &str) -> Result<String> {
    prompter.input(
        &format!("Enter the {} file name (without extension)", what),
        Some(&validate::identifier),
    )
}

/// Free text where blank means "leave it out".
fn optional_text(prompter: &mut dyn Prompter, label: &str) -> Result<Option<String>> {
    let value = prompter.input(label, None)?;
    Ok((!value.is_empty()).then_some(value))
}
