//! Interactive reader for one property tree.

use crate::browse::ReferenceResolver;
use crate::catalog::{Kind, Mode, FORMAT_NONE};
use crate::error::{Result, WizardError};
use crate::model::Property;
use crate::policy::{asks, Ask, Gate};
use crate::prompt::{labels, Prompter};
use crate::validate;
use std::path::Path;
use tracing::debug;

/// Collaborators shared by every node of one build.
pub struct ReadContext<'a> {
    pub prompter: &'a mut dyn Prompter,
    pub resolver: &'a mut dyn ReferenceResolver,
    /// Directory the artifact is written to; references are relative to it.
    pub dest_dir: &'a Path,
    /// Collect examples in API mode.
    pub examples: bool,
}

impl<'a> ReadContext<'a> {
    pub fn new(
        prompter: &'a mut dyn Prompter,
        resolver: &'a mut dyn ReferenceResolver,
        dest_dir: &'a Path,
    ) -> Self {
        Self {
            prompter,
            resolver,
            dest_dir,
            examples: false,
        }
    }

    pub fn with_examples(mut self, enabled: bool) -> Self {
        self.examples = enabled;
        self
    }

    pub(crate) fn gate(&self, mode: Mode, kind: Option<Kind>, has_parent: bool) -> Gate {
        Gate {
            mode,
            kind,
            has_parent,
            examples_enabled: self.examples,
        }
    }
}

impl Property {
    /// Reads a whole node from the prompter, recursing into properties and
    /// items. `parent_required` is the parent's `required` list; the node adds
    /// its own name there when the user marks it required. Roots pass `None`.
    pub fn read_all(
        name: &str,
        mode: Mode,
        parent_required: Option<&mut Vec<String>>,
        cx: &mut ReadContext<'_>,
    ) -> Result<Property> {
        let has_parent = parent_required.is_some();

        if asks(Ask::Reference, &cx.gate(mode, None, has_parent))
            && cx
                .prompter
                .confirm(&format!("Do you want `{}` to reference another schema?", name))?
        {
            let target = cx.resolver.resolve(&mut *cx.prompter, mode, cx.dest_dir)?;
            if target.trim().is_empty() {
                return Err(WizardError::EmptyReference(name.to_string()));
            }
            debug!(property = name, reference = %target, "property is a reference");
            return Ok(Property::reference(target));
        }

        let kinds = labels(&Kind::ALL);
        let kind = Kind::ALL[cx
            .prompter
            .select(&format!("Select type of `{}`", name), &kinds)?];
        let mut node = Property {
            kind: Some(kind),
            ..Property::default()
        };
        let gate = cx.gate(mode, Some(kind), has_parent);

        if asks(Ask::Format, &gate)
            && cx
                .prompter
                .confirm("Do you want to specify a format for this property?")?
        {
            node.format = read_format(cx.prompter, kind)?;
        }

        if let Some(required) = parent_required {
            if asks(Ask::Required, &gate)
                && cx.prompter.confirm(&format!("Is `{}` required?", name))?
            {
                required.push(name.to_string());
            }
        }

        if asks(Ask::Nullable, &gate) {
            node.nullable = Some(cx.prompter.confirm(&format!("Is `{}` nullable?", name))?);
        }

        match kind {
            Kind::Object => node.read_properties(name, mode, cx)?,
            Kind::Array => {
                let items = Property::read_all("items", mode, None, cx)?;
                node.items = Some(Box::new(items));
            }
            _ => {}
        }

        if asks(Ask::Example, &gate)
            && cx
                .prompter
                .confirm("Do you want to add an example value for this property?")?
        {
            node.example = Some(cx.prompter.input("Example value", None)?);
        }

        debug!(property = name, %kind, %mode, "property read");
        Ok(node)
    }

    /// Adds children until the user stops. Fails when none were added.
    fn read_properties(&mut self, name: &str, mode: Mode, cx: &mut ReadContext<'_>) -> Result<()> {
        loop {
            let taken: Vec<String> = self.properties.keys().cloned().collect();
            let check = |input: &str| validate::new_name(input, &taken);
            let child_name = cx.prompter.input(
                &format!("Property name in `{}` (leave blank to finish)", name),
                Some(&check),
            )?;
            if child_name.is_empty() {
                break;
            }

            let child = Property::read_all(&child_name, mode, Some(&mut self.required), cx)?;
            self.properties.insert(child_name, child);

            if !cx
                .prompter
                .confirm(&format!("Do you want to add another property? ({})", name))?
            {
                break;
            }
        }

        if self.properties.is_empty() {
            return Err(WizardError::EmptyObject(name.to_string()));
        }
        Ok(())
    }
}

/// Picks a format from the kind's list; "none" leaves it unset.
pub fn read_format(prompter: &mut dyn Prompter, kind: Kind) -> Result<Option<String>> {
    let formats = labels(kind.formats());
    if formats.is_empty() {
        return Ok(None);
    }
    let choice = &formats[prompter.select("Select format", &formats)?];
    Ok((choice != FORMAT_NONE).then(|| choice.clone()))
}
