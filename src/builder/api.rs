use super::{collect_names, optional_text, read_file_name};
use crate::browse::{pick_directory, pick_yaml_file, ReferenceResolver};
use crate::catalog::{reason_phrase, HttpMethod, Kind, Mode, ParamLocation, MEDIA_TYPES};
use crate::config::Config;
use crate::emit;
use crate::error::{Result, WizardError};
use crate::model::{MediaType, Operation, Parameter, ParameterSchema, Property, RequestBody, Response};
use crate::policy::{asks, Ask};
use crate::property::{read_format, ReadContext};
use crate::prompt::{labels, Prompter};
use crate::validate;
use serde_yaml::{Mapping, Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Optional parts of an operation the user can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    OperationId,
    Summary,
    Description,
    Tags,
    Parameters,
    RequestBody,
    /// Turns on example prompts for every schema of this operation.
    Examples,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::OperationId => "operationId",
            Section::Summary => "summary",
            Section::Description => "description",
            Section::Tags => "tags",
            Section::Parameters => "parameters",
            Section::RequestBody => "requestBody",
            Section::Examples => "examples",
        }
    }

    pub fn offered(method: HttpMethod) -> Vec<Section> {
        let mut sections = vec![
            Section::OperationId,
            Section::Summary,
            Section::Description,
            Section::Tags,
            Section::Parameters,
        ];
        if method.accepts_body() {
            sections.push(Section::RequestBody);
        }
        sections.push(Section::Examples);
        sections
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Methods not yet defined in a path document, in canonical order.
pub fn remaining_methods(document: &Mapping) -> Vec<HttpMethod> {
    let taken: Vec<HttpMethod> = document
        .iter()
        .filter_map(|(key, _)| key.as_str().and_then(HttpMethod::from_key))
        .collect();
    HttpMethod::ALL
        .into_iter()
        .filter(|method| !taken.contains(method))
        .collect()
}

/// `path` command. Creates `{<method>: operation}`, or with `add` inserts a new
/// method into an existing path file and rewrites it.
pub struct ApiBuilder<'a> {
    config: &'a Config,
    prompter: &'a mut dyn Prompter,
    resolver: &'a mut dyn ReferenceResolver,
    add: bool,
}

impl<'a> ApiBuilder<'a> {
    pub fn new(
        config: &'a Config,
        prompter: &'a mut dyn Prompter,
        resolver: &'a mut dyn ReferenceResolver,
        add: bool,
    ) -> Self {
        Self {
            config,
            prompter,
            resolver,
            add,
        }
    }

    pub fn run(self) -> Result<PathBuf> {
        let root = self.config.api_root()?;

        let (path, mut document, methods) = if self.add {
            let file = pick_yaml_file(self.prompter, root, root)?;
            let document = emit::read_mapping(&file)?;
            let methods = remaining_methods(&document);
            if methods.is_empty() {
                return Err(WizardError::NoMethodsLeft(file));
            }
            debug!(file = %file.display(), ?methods, "adding to existing path file");
            (file, document, methods)
        } else {
            let dir = pick_directory(self.prompter, root)?;
            let name = read_file_name(self.prompter, "API")?;
            (emit::artifact_path(&dir, &name), Mapping::new(), HttpMethod::ALL.to_vec())
        };
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let method = methods[self
            .prompter
            .select("Select the HTTP method for the API", &labels(&methods))?];

        let mut cx = ReadContext::new(self.prompter, self.resolver, &dir);
        let operation = read_operation(&mut cx, method)?;
        operation.validate()?;

        document.insert(
            Value::String(method.key().to_string()),
            serde_yaml::to_value(&operation)?,
        );
        let contents = emit::render(&document)?;
        emit::write_file(&path, &contents)?;
        info!(method = %method, file = %path.display(), "path operation written");
        Ok(path)
    }
}

/// Reads one operation. The context's example flag is set from the sections
/// the user picks.
pub fn read_operation(cx: &mut ReadContext<'_>, method: HttpMethod) -> Result<Operation> {
    let offered = Section::offered(method);
    let picked = cx
        .prompter
        .multi_select("Select optional properties", &labels(&offered), false)?;
    let sections: Vec<Section> = picked.into_iter().map(|idx| offered[idx]).collect();
    let enabled = |section: Section| sections.contains(&section);

    let mut operation = Operation::default();
    cx.examples = enabled(Section::Examples);

    if enabled(Section::OperationId) {
        operation.operation_id = Some(
            cx.prompter
                .input("Enter the operation ID", Some(&validate::identifier))?,
        );
    }
    if enabled(Section::Summary) {
        operation.summary = optional_text(cx.prompter, "Enter a brief summary of the API")?;
    }
    if enabled(Section::Description) {
        operation.description =
            optional_text(cx.prompter, "Enter a detailed description of the API")?;
    }
    if enabled(Section::Tags) {
        operation.tags = read_tags(cx.prompter)?;
    }
    if enabled(Section::Parameters) {
        let names = collect_names(cx.prompter, "Parameter name")?;
        for name in names {
            let parameter = read_parameter(cx, name)?;
            operation.parameters.push(parameter);
        }
    }
    if enabled(Section::RequestBody) {
        operation.request_body = Some(read_request_body(cx, enabled(Section::Description))?);
    }
    operation.responses = read_responses(cx, method, enabled(Section::Description))?;

    Ok(operation)
}

fn read_tags(prompter: &mut dyn Prompter) -> Result<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    loop {
        let tag = prompter.input("Enter a tag (leave blank to finish)", None)?;
        if tag.is_empty() {
            return Ok(tags);
        }
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
}

fn read_parameter(cx: &mut ReadContext<'_>, name: String) -> Result<Parameter> {
    let locations = labels(&ParamLocation::ALL);
    let location = ParamLocation::ALL[cx
        .prompter
        .select(&format!("Select location of parameter `{}`", name), &locations)?];
    let schema = read_parameter_schema(cx, &name)?;

    Ok(Parameter {
        name,
        location,
        required: (location == ParamLocation::Path).then_some(true),
        schema,
    })
}

fn read_parameter_schema(cx: &mut ReadContext<'_>, name: &str) -> Result<ParameterSchema> {
    if cx
        .prompter
        .confirm(&format!("Do you want to set a $ref for parameter `{}`?", name))?
    {
        let target = cx.resolver.resolve(&mut *cx.prompter, Mode::Api, cx.dest_dir)?;
        if target.trim().is_empty() {
            return Err(WizardError::EmptyReference(name.to_string()));
        }
        return Ok(ParameterSchema {
            reference: Some(target),
            ..ParameterSchema::default()
        });
    }

    let kinds = labels(&Kind::PRIMITIVE);
    let kind = Kind::PRIMITIVE[cx
        .prompter
        .select(&format!("Select type of parameter `{}`", name), &kinds)?];
    let mut schema = ParameterSchema {
        kind: Some(kind),
        ..ParameterSchema::default()
    };
    let gate = cx.gate(Mode::Api, Some(kind), false);

    if asks(Ask::Format, &gate)
        && cx
            .prompter
            .confirm("Do you want to set a format for the parameter?")?
    {
        schema.format = read_format(cx.prompter, kind)?;
    }

    // Parameters always offer an example; the `examples` section only gates trees.
    if kind.is_examplable()
        && cx
            .prompter
            .confirm("Do you want to add an example value for the parameter?")?
    {
        schema.example = Some(cx.prompter.input("Example value", None)?);
    }

    if kind.is_numeric() {
        if cx
            .prompter
            .confirm("Do you want to set a minimum value for the parameter?")?
        {
            schema.minimum = Some(read_bound(cx.prompter, kind, "minimum", None)?);
        }
        if cx
            .prompter
            .confirm("Do you want to set a maximum value for the parameter?")?
        {
            schema.maximum = Some(read_bound(
                cx.prompter,
                kind,
                "maximum",
                schema.minimum.as_ref(),
            )?);
        }
    }

    Ok(schema)
}

fn parse_bound(kind: Kind, input: &str) -> std::result::Result<Number, String> {
    match kind {
        Kind::Integer => input
            .parse::<i64>()
            .map(Number::from)
            .map_err(|_| format!("'{}' is not an integer", input)),
        _ => input
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Number::from)
            .ok_or_else(|| format!("'{}' is not a number", input)),
    }
}

/// Reads a numeric bound; `floor` is the minimum a maximum must not undercut.
fn read_bound(
    prompter: &mut dyn Prompter,
    kind: Kind,
    label: &str,
    floor: Option<&Number>,
) -> Result<Number> {
    let floor = floor.and_then(|n| n.as_f64());
    let check = |input: &str| {
        let value = parse_bound(kind, input)?;
        match (floor, value.as_f64()) {
            (Some(min), Some(v)) if v < min => {
                Err(format!("{} cannot be less than the minimum {}", label, min))
            }
            _ => Ok(()),
        }
    };

    let raw = prompter.input(&format!("Enter the {} value", label), Some(&check))?;
    parse_bound(kind, &raw).map_err(|reason| WizardError::Structure {
        path: label.to_string(),
        reason,
    })
}

/// Picks an unused media type and reads its schema. Returns `false` when
/// every media type is already used.
fn read_media_type(
    cx: &mut ReadContext<'_>,
    content: &mut BTreeMap<String, MediaType>,
    owner: &str,
) -> Result<bool> {
    let choices: Vec<String> = MEDIA_TYPES
        .iter()
        .filter(|media| !content.contains_key(**media))
        .map(|media| media.to_string())
        .collect();
    if choices.is_empty() {
        return Ok(false);
    }

    let media = choices[cx
        .prompter
        .select(&format!("Select a media type for the {}", owner), &choices)?]
    .clone();
    let schema = Property::read_all("schema", Mode::Api, None, cx)?;
    content.insert(media, MediaType { schema });
    Ok(true)
}

fn read_request_body(cx: &mut ReadContext<'_>, describe: bool) -> Result<RequestBody> {
    let mut body = RequestBody::default();
    if describe {
        body.description =
            optional_text(cx.prompter, "Enter a description for the request body")?;
    }
    body.required = cx.prompter.confirm("Is the request body required?")?;

    while read_media_type(cx, &mut body.content, "request body")? {
        if !cx
            .prompter
            .confirm("Do you want to add another media type?")?
        {
            break;
        }
    }
    Ok(body)
}

fn read_responses(
    cx: &mut ReadContext<'_>,
    method: HttpMethod,
    describe: bool,
) -> Result<BTreeMap<String, Response>> {
    let codes = method.status_codes();
    let items: Vec<String> = codes
        .iter()
        .map(|code| format!("{} {}", code, reason_phrase(*code)))
        .collect();

    let picked = loop {
        let picked = cx.prompter.multi_select(
            "Select the HTTP status codes for the responses",
            &items,
            true,
        )?;
        if !picked.is_empty() {
            break picked;
        }
        warn!("select at least one status code");
    };

    let mut responses = BTreeMap::new();
    for idx in picked {
        let code = codes[idx];
        let owner = format!("{} response", code);

        let mut description = None;
        if describe {
            description =
                optional_text(cx.prompter, &format!("Enter a description for the {}", owner))?;
        }
        let mut response = Response {
            description: description.unwrap_or_else(|| reason_phrase(code).to_string()),
            content: BTreeMap::new(),
        };

        while cx
            .prompter
            .confirm(&format!("Do you want to add a media type to the {}?", owner))?
        {
            if !read_media_type(cx, &mut response.content, &owner)? {
                break;
            }
        }
        responses.insert(code.to_string(), response);
    }
    Ok(responses)
}
