use super::{collect_names, read_file_name};
use crate::browse::{pick_directory, ReferenceResolver};
use crate::catalog::Mode;
use crate::config::Config;
use crate::emit;
use crate::error::{Result, WizardError};
use crate::model::Property;
use crate::property::ReadContext;
use crate::prompt::Prompter;
use crate::validate;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// `schema` command: `{<SchemaName>: <object>}` under the schema root.
pub struct SchemaBuilder<'a> {
    config: &'a Config,
    prompter: &'a mut dyn Prompter,
    resolver: &'a mut dyn ReferenceResolver,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(
        config: &'a Config,
        prompter: &'a mut dyn Prompter,
        resolver: &'a mut dyn ReferenceResolver,
    ) -> Self {
        Self {
            config,
            prompter,
            resolver,
        }
    }

    pub fn run(self) -> Result<PathBuf> {
        let dir = pick_directory(self.prompter, self.config.schema_root()?)?;
        let file_name = read_file_name(self.prompter, "schema")?;
        let schema_name = self
            .prompter
            .input("Schema name", Some(&validate::identifier))?;

        let names = collect_names(self.prompter, "Property name")?;
        if names.is_empty() {
            return Err(WizardError::EmptyObject(schema_name));
        }

        let mut root = Property::object();
        let mut cx = ReadContext::new(self.prompter, self.resolver, &dir);
        for name in names {
            debug!(schema = %schema_name, property = %name, "reading schema property");
            let property = Property::read_all(&name, Mode::Schema, Some(&mut root.required), &mut cx)?;
            root.properties.insert(name, property);
        }
        root.validate(&schema_name)?;

        let mut document = BTreeMap::new();
        document.insert(schema_name, root);
        emit::write_document(&dir, &file_name, &document)
    }
}
