use crate::catalog::{Kind, ParamLocation};
use crate::error::{Result, WizardError};
use serde::Serialize;
use std::collections::BTreeMap;

/// One field's schema. Either a reference (`$ref` only) or a shape (`type` set).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Property {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Property>,

    /// Children that declared themselves required.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// `None` when the mode never asks; only `Some(true)` is written.
    #[serde(skip_serializing_if = "not_true")]
    pub nullable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

fn not_true(flag: &Option<bool>) -> bool {
    *flag != Some(true)
}

impl Property {
    pub fn object() -> Self {
        Self {
            kind: Some(Kind::Object),
            ..Self::default()
        }
    }

    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            reference: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }
}

/// `{title, type: object, properties}` written by the model builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDocument {
    pub title: String,

    #[serde(rename = "type")]
    pub kind: Kind,

    pub properties: BTreeMap<String, Property>,
}

impl ModelDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: Kind::Object,
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    pub responses: BTreeMap<String, Response>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParamLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    pub schema: ParameterSchema,
}

/// Parameter schemas stay flat: a primitive type or a reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_yaml::Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_yaml::Number>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Property,
}

// ------------------ validation helpers ------------------

fn broken(path: &str, reason: impl Into<String>) -> WizardError {
    WizardError::Structure {
        path: path.to_string(),
        reason: reason.into(),
    }
}

impl Property {
    /// Checks the invariants of a finished tree. `path` names this node in
    /// error messages.
    pub fn validate(&self, path: &str) -> Result<()> {
        if let Some(target) = &self.reference {
            if target.is_empty() {
                return Err(WizardError::EmptyReference(path.to_string()));
            }
            let has_shape = self.kind.is_some()
                || self.format.is_some()
                || !self.properties.is_empty()
                || !self.required.is_empty()
                || self.nullable.is_some()
                || self.items.is_some()
                || self.example.is_some();
            if has_shape {
                return Err(broken(path, "$ref cannot be combined with other keys"));
            }
            return Ok(());
        }

        let kind = self.kind.ok_or_else(|| broken(path, "missing type"))?;

        if let Some(format) = &self.format {
            if !kind.formats().contains(&format.as_str()) {
                return Err(broken(path, format!("format '{}' is not valid for {}", format, kind)));
            }
        }

        if self.example.is_some() && !kind.is_examplable() {
            return Err(broken(path, format!("{} cannot carry an example", kind)));
        }

        match kind {
            Kind::Object => {
                if self.properties.is_empty() {
                    return Err(WizardError::EmptyObject(path.to_string()));
                }
                for name in &self.required {
                    if !self.properties.contains_key(name) {
                        return Err(broken(path, format!("required '{}' is not a property", name)));
                    }
                }
                for (name, child) in &self.properties {
                    child.validate(&format!("{}.{}", path, name))?;
                }
            }
            Kind::Array => {
                let items = self
                    .items
                    .as_ref()
                    .ok_or_else(|| WizardError::MissingItems(path.to_string()))?;
                items.validate(&format!("{}[]", path))?;
            }
            _ => {}
        }

        if kind != Kind::Object && (!self.properties.is_empty() || !self.required.is_empty()) {
            return Err(broken(path, format!("{} cannot have properties", kind)));
        }
        if kind != Kind::Array && self.items.is_some() {
            return Err(broken(path, format!("{} cannot have items", kind)));
        }

        Ok(())
    }
}

impl ModelDocument {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(broken("title", "model title is empty"));
        }
        if self.properties.is_empty() {
            return Err(WizardError::EmptyObject(self.title.clone()));
        }
        for (name, property) in &self.properties {
            if property.is_reference() {
                return Err(broken(name, "model properties cannot be references"));
            }
            property.validate(name)?;
        }
        Ok(())
    }
}

impl Operation {
    pub fn validate(&self) -> Result<()> {
        if self.responses.is_empty() {
            return Err(broken("responses", "at least one response is required"));
        }
        for param in &self.parameters {
            let schema = &param.schema;
            if schema.reference.is_none() && schema.kind.is_none() {
                return Err(broken(&param.name, "parameter schema has no type"));
            }
            if let (Some(min), Some(max)) = (&schema.minimum, &schema.maximum) {
                if min.as_f64() > max.as_f64() {
                    return Err(broken(&param.name, "minimum is greater than maximum"));
                }
            }
        }
        if let Some(body) = &self.request_body {
            if body.content.is_empty() {
                return Err(broken("requestBody", "request body has no media type"));
            }
            for (media, content) in &body.content {
                content.schema.validate(&format!("requestBody.{}", media))?;
            }
        }
        for (code, response) in &self.responses {
            for (media, content) in &response.content {
                content.schema.validate(&format!("responses.{}.{}", code, media))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(kind: Kind) -> Property {
        Property {
            kind: Some(kind),
            ..Property::default()
        }
    }

    #[test]
    fn reference_serializes_alone() {
        let yaml = serde_yaml::to_string(&Property::reference("pet.yaml#/Pet")).unwrap();
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("$ref").and_then(|v| v.as_str()), Some("pet.yaml#/Pet"));
    }

    #[test]
    fn nullable_written_only_when_true() {
        let mut prop = scalar(Kind::String);
        prop.nullable = Some(false);
        assert_eq!(serde_yaml::to_string(&prop).unwrap(), "type: string\n");
        prop.nullable = Some(true);
        assert_eq!(serde_yaml::to_string(&prop).unwrap(), "type: string\nnullable: true\n");
    }

    #[test]
    fn empty_object_is_invalid() {
        let err = Property::object().validate("root").unwrap_err();
        assert!(matches!(err, WizardError::EmptyObject(_)));
    }

    #[test]
    fn array_without_items_is_invalid() {
        let err = scalar(Kind::Array).validate("tags").unwrap_err();
        assert!(matches!(err, WizardError::MissingItems(_)));
    }

    #[test]
    fn reference_with_shape_is_invalid() {
        let mut prop = Property::reference("a.yaml#");
        prop.kind = Some(Kind::String);
        assert!(prop.validate("x").is_err());
    }

    #[test]
    fn required_must_name_a_child() {
        let mut obj = Property::object();
        obj.properties.insert("id".into(), scalar(Kind::Integer));
        obj.required.push("name".into());
        assert!(obj.validate("root").is_err());
        obj.required = vec!["id".into()];
        assert!(obj.validate("root").is_ok());
    }

    #[test]
    fn format_must_match_kind() {
        let mut prop = scalar(Kind::Integer);
        prop.format = Some("email".into());
        assert!(prop.validate("id").is_err());
        prop.format = Some("int64".into());
        assert!(prop.validate("id").is_ok());
    }

    #[test]
    fn model_document_shape() {
        let mut model = ModelDocument::new("User");
        let mut id = scalar(Kind::Integer);
        id.format = Some("int64".into());
        model.properties.insert("id".into(), id);
        model.validate().unwrap();
        let yaml = serde_yaml::to_string(&model).unwrap();
        assert_eq!(
            yaml,
            "title: User\ntype: object\nproperties:\n  id:\n    type: integer\n    format: int64\n"
        );
    }

    #[test]
    fn operation_needs_a_response() {
        assert!(Operation::default().validate().is_err());
    }
}
