//! Component name normalization and validation

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_-]").expect("disallowed chars regex"));
static REPEATED_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("separator regex"));

/// Why a proposed component name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameViolation {
    Empty,
    MustStartWithLetter { name: String },
    AlreadyExists { name: String },
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Component name cannot be empty"),
            Self::MustStartWithLetter { name } => {
                write!(f, "Component name '{name}' must start with a letter")
            }
            Self::AlreadyExists { name } => {
                write!(f, "Component '{name}' already exists")
            }
        }
    }
}

/// Normalize a raw name into a component identifier.
///
/// Lower-cases, turns whitespace runs into `-`, drops anything outside
/// `[a-z0-9_-]`, collapses repeated `-` and trims leading/trailing `-`.
/// Idempotent.
pub fn transform(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let dashed = WHITESPACE_RE.replace_all(&lowered, "-");
    let stripped = DISALLOWED_RE.replace_all(&dashed, "");
    let collapsed = REPEATED_SEP_RE.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Validate a raw name against the components directory.
///
/// Returns the transformed name on success so callers never act on the raw input.
pub fn validate(raw: &str, components_dir: &Path) -> Result<String, NameViolation> {
    let name = transform(raw);

    if name.is_empty() {
        return Err(NameViolation::Empty);
    }

    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(NameViolation::MustStartWithLetter { name });
    }

    if components_dir.join(&name).exists() {
        return Err(NameViolation::AlreadyExists { name });
    }

    Ok(name)
}

/// Human-readable title for an identifier: `icon-radio` -> `Icon Radio`
pub fn display_title(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Template field key for a child identifier: separators become `_`
pub fn field_key(identifier: &str) -> String {
    identifier.replace(['-', ' ', '.'], "_")
}
