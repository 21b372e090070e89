use super::{collect_names, read_file_name};
use crate::browse::{pick_directory, NoReferences};
use crate::catalog::Mode;
use crate::config::Config;
use crate::emit;
use crate::error::{Result, WizardError};
use crate::model::{ModelDocument, Property};
use crate::property::ReadContext;
use crate::prompt::Prompter;
use crate::validate;
use std::path::PathBuf;
use tracing::debug;

/// `model` command: `{title, type: object, properties}` under the model root.
pub struct ModelBuilder<'a> {
    config: &'a Config,
    prompter: &'a mut dyn Prompter,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(config: &'a Config, prompter: &'a mut dyn Prompter) -> Self {
        Self { config, prompter }
    }

    /// Runs the whole wizard and returns the written file.
    pub fn run(self) -> Result<PathBuf> {
        let dir = pick_directory(self.prompter, self.config.model_root()?)?;
        let file_name = read_file_name(self.prompter, "model")?;
        let title = self
            .prompter
            .input("Enter the model title", Some(&validate::title))?;

        let names = collect_names(self.prompter, "Property name")?;
        if names.is_empty() {
            return Err(WizardError::EmptyObject(title));
        }

        let mut document = ModelDocument::new(title);
        let mut resolver = NoReferences;
        let mut cx = ReadContext::new(self.prompter, &mut resolver, &dir);
        for name in names {
            debug!(property = %name, "reading model property");
            // Model properties are independent roots; nothing is required.
            let property = Property::read_all(&name, Mode::Model, None, &mut cx)?;
            document.properties.insert(name, property);
        }

        document.validate()?;
        emit::write_document(&dir, &file_name, &document)
    }
}
