//! `$ref` strings: `<relative-posix-path>#<json-pointer>`.

use std::path::{Component, Path, PathBuf};

pub const PROPERTIES: &str = "properties";
pub const ITEMS: &str = "items";

/// Escapes one JSON Pointer token (RFC 6901): `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// JSON Pointer assembled segment by segment while walking a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pointer {
    segments: Vec<String>,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.push(segment);
        self
    }

    /// The fragment part including the leading `#`. The empty pointer is `#`.
    pub fn to_fragment(&self) -> String {
        let mut out = String::from("#");
        for segment in &self.segments {
            out.push('/');
            out.push_str(&escape_token(segment));
        }
        out
    }
}

/// Resolves `.` and `..` without touching the filesystem. Relative paths are
/// anchored at `cwd`.
fn normalize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `target` relative to the directory `base`, with `/` separators.
pub fn relative_posix(base: &Path, target: &Path, cwd: &Path) -> String {
    let base = normalize(base, cwd);
    let target = normalize(target, cwd);

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();
    let shared = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in shared..base_parts.len() {
        parts.push("..".to_string());
    }
    for part in &target_parts[shared..] {
        parts.push(part.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Builds the `$ref` value for `pointer` inside `file`, as seen from files
/// written into `dest_dir`.
pub fn reference_string(dest_dir: &Path, file: &Path, pointer: &Pointer, cwd: &Path) -> String {
    let mut rel = relative_posix(dest_dir, file, cwd);
    let lower = rel.to_ascii_lowercase();
    if !lower.ends_with(".yaml") && !lower.ends_with(".yml") {
        rel.push_str(".yaml");
    }
    format!("{}{}", rel, pointer.to_fragment())
}
