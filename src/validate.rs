//! Input validators shared by the prompts.
//!
//! Validators return `Err(message)` so the prompter can show the message and
//! ask again.

use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_NAME_LEN: usize = 100;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles"));

pub fn is_identifier(input: &str) -> bool {
    IDENTIFIER_RE.is_match(input)
}

/// Non-empty identifier of at most [`MAX_NAME_LEN`] characters.
pub fn identifier(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("name cannot be empty".into());
    }
    if input.chars().count() > MAX_NAME_LEN {
        return Err(format!("name cannot exceed {} characters", MAX_NAME_LEN));
    }
    if !is_identifier(input) {
        return Err(
            "name can only contain alphanumeric characters and underscores, and cannot start with a number"
                .into(),
        );
    }
    Ok(())
}

/// Like [`identifier`], but a blank line is accepted as the end of a list.
pub fn identifier_or_blank(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Ok(());
    }
    identifier(input)
}

/// Identifier that must not collide with any of `taken`. Blank is accepted.
pub fn new_name<'a, I>(input: &str, taken: I) -> Result<(), String>
where
    I: IntoIterator<Item = &'a String>,
{
    identifier_or_blank(input)?;
    if !input.is_empty() && taken.into_iter().any(|t| t == input) {
        return Err(format!("'{}' already exists", input));
    }
    Ok(())
}

/// Free text that must be present, e.g. a model title.
pub fn title(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("title cannot be empty".into());
    }
    if input.chars().count() > MAX_NAME_LEN {
        return Err(format!("title cannot exceed {} characters", MAX_NAME_LEN));
    }
    Ok(())
}
