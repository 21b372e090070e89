//! End-to-end runs of the builders with scripted answers.

use openapi_wizard::browse::{FsReferenceResolver, USE_CURRENT, USE_THIS, BASE_SCHEMA};
use openapi_wizard::builder::{ApiBuilder, ModelBuilder, SchemaBuilder};
use openapi_wizard::prompt::{pick, pick_many, text, Answer, ScriptedPrompter};
use openapi_wizard::{Config, WizardError};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    _tmp: TempDir,
    model: PathBuf,
    schema: PathBuf,
    api: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let model = tmp.path().join("model");
        let schema = tmp.path().join("schema");
        let api = tmp.path().join("api");
        for dir in [&model, &schema, &api] {
            fs::create_dir_all(dir).unwrap();
        }
        Self {
            _tmp: tmp,
            model,
            schema,
            api,
        }
    }

    fn config(&self) -> Config {
        Config::new(
            Some(self.model.clone()),
            Some(self.schema.clone()),
            Some(self.api.clone()),
        )
    }
}

fn load(path: &Path) -> Value {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn model_with_single_integer_property() {
    let ws = Workspace::new();
    let config = ws.config();
    let mut prompter = ScriptedPrompter::new([
        pick(USE_CURRENT),
        text("user"),
        text("User"),
        text("id"),
        text(""),
        pick("integer"),
        Answer::Yes, // format
        pick("int64"),
        Answer::No, // nullable
        Answer::No, // example
    ]);

    let path = ModelBuilder::new(&config, &mut prompter).run().unwrap();

    assert_eq!(path, ws.model.join("user.yaml"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "title: User\ntype: object\nproperties:\n  id:\n    type: integer\n    format: int64\n"
    );
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn schema_with_required_name_and_string_tags() {
    let ws = Workspace::new();
    let config = ws.config();
    let mut resolver = FsReferenceResolver::new(&config).unwrap();
    let mut prompter = ScriptedPrompter::new([
        pick(USE_CURRENT),
        text("pet"),
        text("Pet"),
        text("name"),
        text("tags"),
        text(""),
        // name
        Answer::No, // reference
        pick("string"),
        Answer::No,  // format
        Answer::Yes, // required
        Answer::No,  // nullable
        Answer::No,  // example
        // tags
        Answer::No,
        pick("array"),
        Answer::No, // required
        Answer::No, // nullable
        // tags items
        Answer::No,
        pick("string"),
        Answer::No, // format
        Answer::No, // nullable
        Answer::No, // example
    ]);

    let path = SchemaBuilder::new(&config, &mut prompter, &mut resolver)
        .run()
        .unwrap();
    assert_eq!(prompter.remaining(), 0);

    let doc = load(&path);
    let pet = &doc["Pet"];
    assert_eq!(pet["type"], Value::from("object"));
    assert_eq!(pet["required"], serde_yaml::from_str::<Value>("[name]").unwrap());
    assert_eq!(pet["properties"]["tags"]["items"]["type"], Value::from("string"));
    assert!(pet["properties"]["tags"].get("required").is_none());
}

#[test]
fn failed_schema_writes_nothing() {
    let ws = Workspace::new();
    let config = ws.config();
    let mut resolver = FsReferenceResolver::new(&config).unwrap();
    let mut prompter = ScriptedPrompter::new([
        pick(USE_CURRENT),
        text("pet"),
        text("Pet"),
        text("owner"),
        text(""),
        Answer::No,
        pick("object"),
        Answer::No, // required
        Answer::No, // nullable
        text(""),   // no children
    ]);

    let err = SchemaBuilder::new(&config, &mut prompter, &mut resolver)
        .run()
        .unwrap_err();
    assert!(matches!(err, WizardError::EmptyObject(name) if name == "owner"));
    assert_eq!(fs::read_dir(&ws.schema).unwrap().count(), 0);
}

fn write_pet_schema(ws: &Workspace) {
    fs::write(
        ws.schema.join("pet.yaml"),
        "Pet:\n  type: object\n  properties:\n    name:\n      type: string\n",
    )
    .unwrap();
}

#[test]
fn get_operation_with_query_parameter_and_referenced_response() {
    let ws = Workspace::new();
    write_pet_schema(&ws);
    let config = ws.config();
    let mut resolver = FsReferenceResolver::new(&config).unwrap();
    let mut prompter = ScriptedPrompter::new([
        pick(USE_CURRENT),
        text("pets"),
        pick("GET"),
        pick_many(&["parameters"]),
        text("limit"),
        text(""),
        pick("query"),
        Answer::No, // $ref
        pick("integer"),
        Answer::No, // format
        Answer::No, // example
        Answer::No, // minimum
        Answer::No, // maximum
        pick_many(&["200 OK"]),
        Answer::Yes, // add media type
        pick("application/json"),
        Answer::Yes, // reference
        pick(BASE_SCHEMA),
        pick("pet.yaml"),
        pick("Pet"),
        pick(USE_THIS),
        Answer::No, // another media type
    ]);

    let path = ApiBuilder::new(&config, &mut prompter, &mut resolver, false)
        .run()
        .unwrap();
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(path, ws.api.join("pets.yaml"));

    let doc = load(&path);
    let get = &doc["get"];

    let param = &get["parameters"][0];
    assert_eq!(param["name"], Value::from("limit"));
    assert_eq!(param["in"], Value::from("query"));
    assert_eq!(param["schema"]["type"], Value::from("integer"));

    let schema = get["responses"]["200"]["content"]["application/json"]["schema"]
        .as_mapping()
        .unwrap();
    assert_eq!(schema.len(), 1);
    assert_eq!(
        schema.get("$ref").and_then(Value::as_str),
        Some("../schema/pet.yaml#/Pet")
    );
    assert_eq!(get["responses"]["200"]["description"], Value::from("OK"));
}

#[test]
fn post_operation_with_path_parameter_and_request_body() {
    let ws = Workspace::new();
    let config = ws.config();
    let mut resolver = FsReferenceResolver::new(&config).unwrap();
    let mut prompter = ScriptedPrompter::new([
        pick(USE_CURRENT),
        text("items"),
        pick("POST"),
        pick_many(&["description", "parameters", "requestBody"]),
        text("Create an item"),
        text("id"),
        text(""),
        pick("path"),
        Answer::No, // $ref
        pick("integer"),
        Answer::No,  // format
        Answer::Yes, // example, asked without the examples section
        text("7"),
        Answer::Yes, // minimum
        text("5"),
        Answer::Yes, // maximum
        text("3"),
        text("9"),
        // request body
        text("New item"),
        Answer::Yes, // required
        pick("application/json"),
        Answer::No, // reference
        pick("object"),
        text("n"),
        Answer::No,
        pick("string"),
        Answer::No,  // format
        Answer::Yes, // required
        Answer::No,  // another property
        Answer::No,  // another media type
        // responses
        pick_many(&["201 Created"]),
        text(""),
        Answer::No,
    ]);

    let path = ApiBuilder::new(&config, &mut prompter, &mut resolver, false)
        .run()
        .unwrap();
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(
        prompter.rejections(),
        &["maximum cannot be less than the minimum 5".to_string()]
    );

    let doc = load(&path);
    let post = &doc["post"];
    assert_eq!(post["description"], Value::from("Create an item"));

    let param = &post["parameters"][0];
    assert_eq!(param["in"], Value::from("path"));
    assert_eq!(param["required"], Value::from(true));
    assert_eq!(param["schema"]["example"], Value::from("7"));
    assert_eq!(param["schema"]["minimum"], Value::from(5));
    assert_eq!(param["schema"]["maximum"], Value::from(9));

    let body = &post["requestBody"];
    assert_eq!(body["description"], Value::from("New item"));
    assert_eq!(body["required"], Value::from(true));
    let schema = &body["content"]["application/json"]["schema"];
    assert_eq!(schema["type"], Value::from("object"));
    assert_eq!(schema["required"], serde_yaml::from_str::<Value>("[n]").unwrap());
    assert!(schema["properties"]["n"].get("example").is_none());

    assert_eq!(post["responses"]["201"]["description"], Value::from("Created"));
}

fn existing_get(ws: &Workspace) -> PathBuf {
    let path = ws.api.join("pets.yaml");
    fs::write(
        &path,
        "get:\n  summary: List pets\n  responses:\n    '200':\n      description: OK\n",
    )
    .unwrap();
    path
}

#[test]
fn add_mode_offers_only_missing_methods() {
    let ws = Workspace::new();
    let path = existing_get(&ws);
    let before = fs::read_to_string(&path).unwrap();
    let config = ws.config();
    let mut resolver = FsReferenceResolver::new(&config).unwrap();
    let mut prompter = ScriptedPrompter::new([pick("pets.yaml"), pick("GET")]);

    let err = ApiBuilder::new(&config, &mut prompter, &mut resolver, true)
        .run()
        .unwrap_err();
    assert!(matches!(err, WizardError::UnexpectedAnswer { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn add_mode_keeps_existing_method() {
    let ws = Workspace::new();
    let path = existing_get(&ws);
    let original_get = load(&path)["get"].clone();
    let config = ws.config();
    let mut resolver = FsReferenceResolver::new(&config).unwrap();
    let mut prompter = ScriptedPrompter::new([
        pick("pets.yaml"),
        pick("POST"),
        pick_many(&[]),
        pick_many(&["201 Created"]),
        Answer::No, // no media type
    ]);

    ApiBuilder::new(&config, &mut prompter, &mut resolver, true)
        .run()
        .unwrap();

    let doc = load(&path);
    assert_eq!(doc["get"], original_get);
    assert_eq!(doc["post"]["responses"]["201"]["description"], Value::from("Created"));
}

#[test]
fn add_mode_with_every_method_defined_fails() {
    let ws = Workspace::new();
    let path = ws.api.join("full.yaml");
    let body: String = ["get", "post", "put", "delete", "patch", "head", "options"]
        .iter()
        .map(|m| format!("{}:\n  responses: {{}}\n", m))
        .collect();
    fs::write(&path, &body).unwrap();
    let config = ws.config();
    let mut resolver = FsReferenceResolver::new(&config).unwrap();
    let mut prompter = ScriptedPrompter::new([pick("full.yaml")]);

    let err = ApiBuilder::new(&config, &mut prompter, &mut resolver, true)
        .run()
        .unwrap_err();
    assert!(matches!(err, WizardError::NoMethodsLeft(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), body);
}
