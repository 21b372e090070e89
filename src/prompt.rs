//! Prompting.
//!
//! Builders only talk to the [`Prompter`] trait. [`TerminalPrompter`] renders
//! prompts with `dialoguer`; [`ScriptedPrompter`] replays a fixed list of
//! answers, which is how builders are driven without a terminal.

use crate::error::{Result, WizardError};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::VecDeque;

/// Validates a line of text; `Err` carries the message shown to the user.
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// Lists longer than this get a search prompt before a filtered multi-select.
const FILTER_THRESHOLD: usize = 8;

pub trait Prompter {
    /// Free text. The prompter re-asks until `validator` accepts the input.
    fn input(&mut self, label: &str, validator: Option<Validator<'_>>) -> Result<String>;

    fn confirm(&mut self, label: &str) -> Result<bool>;

    /// Returns the index of the chosen item.
    fn select(&mut self, label: &str, items: &[String]) -> Result<usize>;

    /// Returns the indices of the chosen items in list order. With `searchable`
    /// the user may narrow the list with a fuzzy query first.
    fn multi_select(&mut self, label: &str, items: &[String], searchable: bool)
        -> Result<Vec<usize>>;
}

/// Indices of `items` matching `query`, best match first. A blank query keeps
/// every item in its original order.
pub fn fuzzy_filter(items: &[String], query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return (0..items.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| matcher.fuzzy_match(item, query).map(|score| (score, idx)))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, idx)| idx).collect()
}

// ------------------ terminal ------------------

pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, label: &str, validator: Option<Validator<'_>>) -> Result<String> {
        let mut prompt = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true);
        if let Some(validate) = validator {
            prompt = prompt.validate_with(move |value: &String| validate(value.trim()));
        }
        let value = prompt.interact_text()?;
        Ok(value.trim().to_string())
    }

    fn confirm(&mut self, label: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(false)
            .interact_opt()?
            .ok_or(WizardError::Cancelled)
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize> {
        if items.is_empty() {
            return Err(WizardError::Cancelled);
        }
        Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(items)
            .default(0)
            .interact_opt()?
            .ok_or(WizardError::Cancelled)
    }

    fn multi_select(
        &mut self,
        label: &str,
        items: &[String],
        searchable: bool,
    ) -> Result<Vec<usize>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut visible: Vec<usize> = (0..items.len()).collect();
        if searchable && items.len() > FILTER_THRESHOLD {
            loop {
                let query = self.input(&format!("{} - search (blank lists all)", label), None)?;
                visible = fuzzy_filter(items, &query);
                if !visible.is_empty() {
                    break;
                }
                eprintln!("No match for '{}'", query);
            }
        }

        let shown: Vec<&String> = visible.iter().map(|&idx| &items[idx]).collect();
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{} (space to toggle, enter to confirm)", label))
            .items(&shown)
            .interact_opt()?
            .ok_or(WizardError::Cancelled)?;

        let mut indices: Vec<usize> = picked.into_iter().map(|pos| visible[pos]).collect();
        indices.sort_unstable();
        Ok(indices)
    }
}

// ------------------ scripted ------------------

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Yes,
    No,
    /// Select the item with this exact label.
    Pick(String),
    /// Select every item with one of these labels.
    PickMany(Vec<String>),
}

pub fn text(value: &str) -> Answer {
    Answer::Text(value.to_string())
}

pub fn pick(label: &str) -> Answer {
    Answer::Pick(label.to_string())
}

pub fn pick_many(labels: &[&str]) -> Answer {
    Answer::PickMany(labels.iter().map(|l| l.to_string()).collect())
}

/// Replays answers in order. Running out of answers behaves like the user
/// cancelling. Text rejected by a validator is recorded and the next answer is
/// tried, the same way a terminal user would retype it.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    rejections: Vec<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I: IntoIterator<Item = Answer>>(answers: I) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            rejections: Vec::new(),
            asked: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Validation messages produced by rejected text answers.
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    /// Labels of every prompt shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next(&mut self, label: &str) -> Result<Answer> {
        self.asked.push(label.to_string());
        self.answers.pop_front().ok_or(WizardError::Cancelled)
    }
}

fn unexpected(label: &str, expected: &'static str) -> WizardError {
    WizardError::UnexpectedAnswer {
        prompt: label.to_string(),
        expected,
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, label: &str, validator: Option<Validator<'_>>) -> Result<String> {
        loop {
            let value = match self.next(label)? {
                Answer::Text(value) => value,
                _ => return Err(unexpected(label, "text")),
            };
            match validator.map(|validate| validate(&value)) {
                Some(Err(message)) => self.rejections.push(message),
                _ => return Ok(value),
            }
        }
    }

    fn confirm(&mut self, label: &str) -> Result<bool> {
        match self.next(label)? {
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            _ => Err(unexpected(label, "yes/no")),
        }
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize> {
        match self.next(label)? {
            Answer::Pick(choice) => items
                .iter()
                .position(|item| *item == choice)
                .ok_or_else(|| unexpected(label, "one of the listed items")),
            _ => Err(unexpected(label, "a single pick")),
        }
    }

    fn multi_select(
        &mut self,
        label: &str,
        items: &[String],
        _searchable: bool,
    ) -> Result<Vec<usize>> {
        match self.next(label)? {
            Answer::PickMany(choices) => {
                let mut indices = Vec::with_capacity(choices.len());
                for choice in &choices {
                    let idx = items
                        .iter()
                        .position(|item| item == choice)
                        .ok_or_else(|| unexpected(label, "listed items"))?;
                    indices.push(idx);
                }
                indices.sort_unstable();
                indices.dedup();
                Ok(indices)
            }
            _ => Err(unexpected(label, "a multi pick")),
        }
    }
}

/// Labels for a list of displayable values.
pub fn labels<T: std::fmt::Display>(values: &[T]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn blank_query_keeps_everything() {
        let list = items(&["200 OK", "404 Not Found"]);
        assert_eq!(fuzzy_filter(&list, "  "), vec![0, 1]);
    }

    #[test]
    fn query_narrows_list() {
        let list = items(&["200 OK", "201 Created", "404 Not Found", "500 Internal Server Error"]);
        let hits = fuzzy_filter(&list, "found");
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn scripted_retries_rejected_text() {
        let mut prompter = ScriptedPrompter::new([text("1bad"), text("good")]);
        let check = |s: &str| crate::validate::identifier(s);
        let value = prompter.input("Name", Some(&check)).unwrap();
        assert_eq!(value, "good");
        assert_eq!(prompter.rejections().len(), 1);
    }

    #[test]
    fn scripted_exhaustion_is_cancel() {
        let mut prompter = ScriptedPrompter::new([]);
        assert!(matches!(prompter.confirm("Sure?"), Err(WizardError::Cancelled)));
    }

    #[test]
    fn scripted_pick_by_label() {
        let mut prompter = ScriptedPrompter::new([pick("b"), pick_many(&["c", "a"])]);
        let list = items(&["a", "b", "c"]);
        assert_eq!(prompter.select("One", &list).unwrap(), 1);
        assert_eq!(prompter.multi_select("Many", &list, false).unwrap(), vec![0, 2]);
    }

    #[test]
    fn scripted_wrong_answer_type() {
        let mut prompter = ScriptedPrompter::new([Answer::Yes]);
        let err = prompter.input("Name", None).unwrap_err();
        assert!(matches!(err, WizardError::UnexpectedAnswer { .. }));
    }
}
