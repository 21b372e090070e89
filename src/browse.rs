//! Directory and file browsing, and resolving `$ref` targets in existing
//! artifacts.

use crate::catalog::{Kind, Mode};
use crate::config::Config;
use crate::error::{Result, WizardError};
use crate::prompt::Prompter;
use crate::reference::{reference_string, Pointer, ITEMS, PROPERTIES};
use crate::validate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const USE_CURRENT: &str = "./ (use this directory)";
pub const PARENT_DIR: &str = "../";
pub const NEW_DIR: &str = "+ new directory";
pub const BACK_TO_FILES: &str = "<- back to file selection";
pub const USE_THIS: &str = "Use this";
pub const USE_THIS_FIELD: &str = "Use this field";
pub const SELECT_FIELD: &str = "Select field";
pub const GO_DEEPER: &str = "Continue into sub-properties";
pub const BASE_MODEL: &str = "MODEL";
pub const BASE_SCHEMA: &str = "SCHEMA";

/// Sub-directories (with a trailing `/`) and files of `dir`, sorted, with
/// dot-entries hidden.
pub fn read_entries(dir: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_dir() {
            dirs.push(format!("{}/", name));
        } else {
            files.push(name);
        }
    }

    dirs.sort();
    files.sort();
    Ok((dirs, files))
}

pub fn is_yaml_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}

/// Lets the user walk below `start` and pick (or create) a directory.
pub fn pick_directory(prompter: &mut dyn Prompter, start: &Path) -> Result<PathBuf> {
    let start = start.to_path_buf();
    let mut cwd = start.clone();

    loop {
        let (dirs, _) = read_entries(&cwd)?;

        let mut items = vec![USE_CURRENT.to_string()];
        if cwd != start {
            items.push(PARENT_DIR.to_string());
        }
        items.extend(dirs);
        items.push(NEW_DIR.to_string());

        let choice = items[prompter.select(&format!("Select directory in {}", cwd.display()), &items)?].clone();
        match choice.as_str() {
            USE_CURRENT => return Ok(cwd),
            PARENT_DIR => {
                cwd.pop();
            }
            NEW_DIR => {
                let name = prompter.input("New directory name", Some(&validate::identifier))?;
                let path = cwd.join(name);
                if path.is_dir() {
                    info!(dir = %path.display(), "directory already exists");
                } else {
                    fs::create_dir_all(&path)?;
                    info!(dir = %path.display(), "created directory");
                }
                return Ok(path);
            }
            dir => cwd.push(dir.trim_end_matches('/')),
        }
    }
}

/// Lets the user walk below `root`, starting in `start`, and pick a YAML file.
pub fn pick_yaml_file(prompter: &mut dyn Prompter, root: &Path, start: &Path) -> Result<PathBuf> {
    let mut cwd = start.to_path_buf();

    loop {
        let (dirs, files) = read_entries(&cwd)?;

        let mut items = Vec::new();
        if cwd != root {
            items.push(PARENT_DIR.to_string());
        }
        items.extend(dirs);
        items.extend(files.into_iter().filter(|f| is_yaml_file(f)));

        if items.is_empty() {
            return Err(WizardError::NothingToSelect(cwd));
        }

        let choice = items[prompter.select(&format!("Select entry in {}", cwd.display()), &items)?].clone();
        if choice == PARENT_DIR {
            cwd.pop();
        } else if let Some(dir) = choice.strip_suffix('/') {
            cwd.push(dir);
        } else {
            return Ok(cwd.join(choice));
        }
    }
}

/// Produces the `$ref` for a property that points at another artifact.
pub trait ReferenceResolver {
    /// `dest_dir` is where the artifact being authored will be written.
    fn resolve(&mut self, prompter: &mut dyn Prompter, mode: Mode, dest_dir: &Path)
        -> Result<String>;
}

/// Resolver for builds that never reference, i.e. models.
pub struct NoReferences;

impl ReferenceResolver for NoReferences {
    fn resolve(&mut self, _: &mut dyn Prompter, mode: Mode, _: &Path) -> Result<String> {
        Err(WizardError::UnsupportedReference(mode.to_string()))
    }
}

// ------------------ document outlines ------------------

/// Just enough of a stored property to walk into it.
#[derive(Debug, Default, Deserialize)]
struct Outline {
    #[serde(rename = "type", default)]
    kind: Option<Kind>,
    #[serde(default)]
    properties: BTreeMap<String, Outline>,
    #[serde(default)]
    items: Option<Box<Outline>>,
}

impl Outline {
    fn is_object(&self) -> bool {
        self.kind == Some(Kind::Object) && !self.properties.is_empty()
    }

    fn is_array(&self) -> bool {
        self.kind == Some(Kind::Array) && self.items.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct ModelOutline {
    #[serde(default)]
    properties: BTreeMap<String, Outline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Model,
    Schema,
}

/// Outcome of walking one file.
enum Walk {
    Done(Pointer),
    Back,
}

fn parse<T: for<'de> Deserialize<'de>>(file: &Path) -> Result<T> {
    let raw = fs::read_to_string(file)?;
    serde_yaml::from_str(&raw).map_err(|e| WizardError::MalformedDocument {
        path: file.to_path_buf(),
        reason: e.to_string(),
    })
}

fn with_back(keys: impl Iterator<Item = String>) -> Vec<String> {
    std::iter::once(BACK_TO_FILES.to_string()).chain(keys).collect()
}

/// Walks properties starting at `current`, extending `pointer`.
fn walk_properties(
    prompter: &mut dyn Prompter,
    mut current: &BTreeMap<String, Outline>,
    mut pointer: Pointer,
) -> Result<Walk> {
    loop {
        let options = with_back(current.keys().cloned());
        let choice = &options[prompter.select("Select property", &options)?];
        if choice == BACK_TO_FILES {
            return Ok(Walk::Back);
        }

        pointer.push(choice.clone());
        let prop = &current[choice];

        if prop.is_object() {
            let next = [GO_DEEPER.to_string(), USE_THIS_FIELD.to_string()];
            if prompter.select("This is an object. Continue into sub-properties?", &next)? == 0 {
                current = &prop.properties;
                pointer.push(PROPERTIES);
                continue;
            }
            return Ok(Walk::Done(pointer));
        }

        if let (true, Some(items)) = (prop.is_array(), prop.items.as_deref()) {
            let next = [ITEMS.to_string(), USE_THIS_FIELD.to_string()];
            if prompter.select("This is an array. Select items or use the array as is?", &next)? == 0 {
                pointer.push(ITEMS);
                if items.is_object() {
                    current = &items.properties;
                    pointer.push(PROPERTIES);
                    continue;
                }
            }
        }
        return Ok(Walk::Done(pointer));
    }
}

fn walk_model_file(prompter: &mut dyn Prompter, file: &Path) -> Result<Walk> {
    let model: ModelOutline = parse(file)?;
    if model.properties.is_empty() {
        return Err(WizardError::MalformedDocument {
            path: file.to_path_buf(),
            reason: "model has no properties".into(),
        });
    }
    walk_properties(prompter, &model.properties, Pointer::new().with(PROPERTIES))
}

fn walk_schema_file(prompter: &mut dyn Prompter, file: &Path) -> Result<Walk> {
    let roots: BTreeMap<String, Outline> = parse(file)?;
    if roots.is_empty() {
        return Err(WizardError::MalformedDocument {
            path: file.to_path_buf(),
            reason: "schema file has no root entries".into(),
        });
    }

    let options = with_back(roots.keys().cloned());
    let name = &options[prompter.select("Select root schema", &options)?];
    if name == BACK_TO_FILES {
        return Ok(Walk::Back);
    }

    let mut pointer = Pointer::new().with(name.clone());
    let mut current = &roots[name];

    if current.is_object() || current.is_array() {
        let next = [USE_THIS.to_string(), SELECT_FIELD.to_string()];
        if prompter.select("Use the root schema as reference?", &next)? == 0 {
            return Ok(Walk::Done(pointer));
        }
    }

    loop {
        if current.is_object() {
            pointer.push(PROPERTIES);
            return walk_properties(prompter, &current.properties, pointer);
        }
        if let (true, Some(items)) = (current.is_array(), current.items.as_deref()) {
            let next = [ITEMS.to_string(), USE_THIS_FIELD.to_string()];
            if prompter.select("Array detected. Select items or use the array as is?", &next)? == 0 {
                pointer.push(ITEMS);
                current = items;
                continue;
            }
        }
        return Ok(Walk::Done(pointer));
    }
}

/// Browses the configured model/schema roots for reference targets.
pub struct FsReferenceResolver {
    model_root: PathBuf,
    schema_root: PathBuf,
    cwd: PathBuf,
}

impl FsReferenceResolver {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            model_root: config.model_root()?.to_path_buf(),
            schema_root: config.schema_root()?.to_path_buf(),
            cwd: std::env::current_dir()?,
        })
    }

    fn start(&self, prompter: &mut dyn Prompter, mode: Mode) -> Result<(PathBuf, FileKind)> {
        match mode {
            Mode::Schema => Ok((self.model_root.clone(), FileKind::Model)),
            Mode::Api => {
                let bases = [BASE_MODEL.to_string(), BASE_SCHEMA.to_string()];
                match prompter.select("Which base path to reference?", &bases)? {
                    0 => Ok((self.model_root.clone(), FileKind::Model)),
                    _ => Ok((self.schema_root.clone(), FileKind::Schema)),
                }
            }
            Mode::Model => Err(WizardError::UnsupportedReference(mode.to_string())),
        }
    }
}

impl ReferenceResolver for FsReferenceResolver {
    fn resolve(
        &mut self,
        prompter: &mut dyn Prompter,
        mode: Mode,
        dest_dir: &Path,
    ) -> Result<String> {
        let (root, kind) = self.start(prompter, mode)?;
        let mut dir = root.clone();

        loop {
            let file = pick_yaml_file(prompter, &root, &dir)?;
            if let Some(parent) = file.parent() {
                dir = parent.to_path_buf();
            }
            debug!(file = %file.display(), ?kind, "walking reference target");

            let walk = match kind {
                FileKind::Model => walk_model_file(prompter, &file)?,
                FileKind::Schema => walk_schema_file(prompter, &file)?,
            };

            if let Walk::Done(pointer) = walk {
                return Ok(reference_string(dest_dir, &file, &pointer, &self.cwd));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{pick, text, ScriptedPrompter};

    fn write(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn entries_hide_dotfiles() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("b.yaml"), "");
        write(&tmp.path().join(".hidden.yaml"), "");
        write(&tmp.path().join("sub/a.yml"), "");
        fs::create_dir(tmp.path().join(".git")).unwrap();

        let (dirs, files) = read_entries(tmp.path()).unwrap();
        assert_eq!(dirs, vec!["sub/"]);
        assert_eq!(files, vec!["b.yaml"]);
    }

    #[test]
    fn pick_directory_descends_and_creates() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("users")).unwrap();

        let mut prompter = ScriptedPrompter::new([pick("users/"), pick(NEW_DIR), text("v1")]);
        let dir = pick_directory(&mut prompter, tmp.path()).unwrap();
        assert_eq!(dir, tmp.path().join("users").join("v1"));
        assert!(dir.is_dir());
    }

    #[test]
    fn pick_directory_can_go_back_up() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();

        let mut prompter = ScriptedPrompter::new([pick("a/"), pick(PARENT_DIR), pick(USE_CURRENT)]);
        let dir = pick_directory(&mut prompter, tmp.path()).unwrap();
        assert_eq!(dir, tmp.path());
    }

    #[test]
    fn file_picker_lists_only_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("notes.txt"), "");
        let mut prompter = ScriptedPrompter::new([]);
        let err = pick_yaml_file(&mut prompter, tmp.path(), tmp.path()).unwrap_err();
        assert!(matches!(err, WizardError::NothingToSelect(_)));
    }

    #[test]
    fn model_walk_into_nested_property() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("user.yaml");
        write(
            &file,
            "title: User\ntype: object\nproperties:\n  address:\n    type: object\n    properties:\n      a/b~c:\n        type: string\n",
        );

        let mut prompter = ScriptedPrompter::new([pick("address"), pick(GO_DEEPER), pick("a/b~c")]);
        let walk = walk_model_file(&mut prompter, &file).unwrap();
        match walk {
            Walk::Done(pointer) => {
                assert_eq!(pointer.to_fragment(), "#/properties/address/properties/a~1b~0c")
            }
            Walk::Back => panic!("expected a pointer"),
        }
    }

    #[test]
    fn schema_walk_uses_root() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("pet.yaml");
        write(&file, "Pet:\n  type: object\n  properties:\n    name:\n      type: string\n");

        let mut prompter = ScriptedPrompter::new([pick("Pet"), pick(USE_THIS)]);
        match walk_schema_file(&mut prompter, &file).unwrap() {
            Walk::Done(pointer) => assert_eq!(pointer.to_fragment(), "#/Pet"),
            Walk::Back => panic!("expected a pointer"),
        }
    }

    #[test]
    fn resolver_returns_relative_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let models = tmp.path().join("model");
        let schemas = tmp.path().join("schema");
        let api = tmp.path().join("api");
        write(&schemas.join("pet.yaml"), "Pet:\n  type: string\n");
        write(&models.join("user.yaml"), "properties:\n  id:\n    type: integer\n");
        fs::create_dir_all(&api).unwrap();

        let mut resolver = FsReferenceResolver {
            model_root: models,
            schema_root: schemas,
            cwd: tmp.path().to_path_buf(),
        };
        let mut prompter = ScriptedPrompter::new([pick(BASE_SCHEMA), pick("pet.yaml"), pick("Pet")]);
        let reference = resolver.resolve(&mut prompter, Mode::Api, &api).unwrap();
        assert_eq!(reference, "../schema/pet.yaml#/Pet");
    }

    #[test]
    fn back_returns_to_file_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let models = tmp.path().join("model");
        write(&models.join("a.yaml"), "properties:\n  x:\n    type: string\n");
        write(&models.join("b.yaml"), "properties:\n  y:\n    type: string\n");

        let mut resolver = FsReferenceResolver {
            model_root: models.clone(),
            schema_root: tmp.path().join("schema"),
            cwd: tmp.path().to_path_buf(),
        };
        let mut prompter = ScriptedPrompter::new([
            pick("a.yaml"),
            pick(BACK_TO_FILES),
            pick("b.yaml"),
            pick("y"),
        ]);
        let reference = resolver.resolve(&mut prompter, Mode::Schema, &models).unwrap();
        assert_eq!(reference, "b.yaml#/properties/y");
    }

    #[test]
    fn model_mode_cannot_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let mut resolver = FsReferenceResolver {
            model_root: tmp.path().to_path_buf(),
            schema_root: tmp.path().to_path_buf(),
            cwd: tmp.path().to_path_buf(),
        };
        let mut prompter = ScriptedPrompter::new([]);
        let err = resolver.resolve(&mut prompter, Mode::Model, tmp.path()).unwrap_err();
        assert!(matches!(err, WizardError::UnsupportedReference(_)));
    }
}
