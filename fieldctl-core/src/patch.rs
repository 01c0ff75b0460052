//! Registration of generated components in the shared project documents
//!
//! Three documents list custom components:
//! - the form filter document (`"id": "form"` group's `components` list)
//! - the component definition registry (`custom-form-components` group)
//! - the behavior mapping script (`customComponents` array)
//!
//! The filter document and the mapping script are hand-formatted, so they are
//! patched by replacing only the captured list body. Every other byte stays
//! as it was. The registry is machine-curated and is rewritten in full.
//! All three operations are idempotent.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::layout::ProjectLayout;
use crate::rewrite::INCLUDE_KEY;

static QUOTED_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("quoted item regex")
});

static MAPPING_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:let|const|var)\s+customComponents\s*=\s*\[([^\]]*)\]")
        .expect("mapping list regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedDocument {
    Filters,
    Registry,
    Mappings,
}

impl fmt::Display for SharedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filters => write!(f, "form filters"),
            Self::Registry => write!(f, "component definition registry"),
            Self::Mappings => write!(f, "component mappings"),
        }
    }
}

/// A shared-document patch that failed after the component files were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPatchWarning {
    pub document: SharedDocument,
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ConfigPatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not update {} ({}): {}. Register the component there by hand.",
            self.document,
            self.path.display(),
            self.reason
        )
    }
}

/// Where a flat identifier list lives inside a text document
#[derive(Debug, Clone)]
pub struct ListAnchor {
    /// Must capture exactly the list body (between the brackets) in group 1
    pattern: Regex,
    quote: char,
    indent: String,
}

impl ListAnchor {
    pub fn new(pattern: Regex, quote: char, indent: impl Into<String>) -> Self {
        Self {
            pattern,
            quote,
            indent: indent.into(),
        }
    }

    /// The `components` list of the filter whose `id` is `group_id`
    pub fn filter_group(group_id: &str) -> Self {
        let pattern = format!(
            r#""id"\s*:\s*"{}"\s*,\s*"components"\s*:\s*\[([^\]]*)\]"#,
            regex::escape(group_id)
        );
        Self::new(
            Regex::new(&pattern).expect("escaped filter pattern"),
            '"',
            " ".repeat(8),
        )
    }

    /// The `customComponents` array of the mapping script
    pub fn mapping_list() -> Self {
        Self::new(MAPPING_LIST_RE.clone(), '\'', "  ")
    }
}

/// Add `name` to the anchored list in `text`.
///
/// Returns the new text (identical to the input when `name` is already listed).
pub fn patch_list(
    text: &str,
    anchor: &ListAnchor,
    name: &str,
) -> Result<(String, PatchOutcome), String> {
    let body = anchor
        .pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| "component list not found".to_string())?;

    let mut items: Vec<String> = QUOTED_ITEM_RE
        .captures_iter(body.as_str())
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect();

    if items.iter().any(|item| item == name) {
        return Ok((text.to_string(), PatchOutcome::AlreadyPresent));
    }
    items.push(name.to_string());

    let closing_indent = line_indent(text, body.end());
    let q = anchor.quote;
    let lines: Vec<String> = items
        .iter()
        .map(|item| format!("{}{q}{item}{q}", anchor.indent))
        .collect();
    let new_body = format!("\n{}\n{closing_indent}", lines.join(",\n"));

    let mut patched = String::with_capacity(text.len() + new_body.len());
    patched.push_str(&text[..body.start()]);
    patched.push_str(&new_body);
    patched.push_str(&text[body.end()..]);

    Ok((patched, PatchOutcome::Added))
}

/// Leading whitespace of the line containing byte offset `pos`
fn line_indent(text: &str, pos: usize) -> &str {
    let start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[start..];
    let width = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..width]
}

/// Append a `{"...": include}` entry to the `group_id` group of a registry document
pub fn patch_registry(
    text: &str,
    group_id: &str,
    include: &str,
) -> Result<(String, PatchOutcome), String> {
    let mut doc: Value = serde_json::from_str(text).map_err(|e| format!("invalid JSON: {e}"))?;

    let group = doc
        .get_mut("groups")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| "missing \"groups\" array".to_string())?
        .iter_mut()
        .find(|group| group.get("id").and_then(Value::as_str) == Some(group_id))
        .ok_or_else(|| format!("group \"{group_id}\" not found"))?;

    let group = group
        .as_object_mut()
        .ok_or_else(|| format!("group \"{group_id}\" is not an object"))?;
    let components = group
        .entry("components")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| format!("group \"{group_id}\" components is not an array"))?;

    let registered = components
        .iter()
        .any(|entry| entry.get(INCLUDE_KEY).and_then(Value::as_str) == Some(include));
    if registered {
        return Ok((text.to_string(), PatchOutcome::AlreadyPresent));
    }

    let mut entry = Map::new();
    entry.insert(INCLUDE_KEY.to_string(), Value::String(include.to_string()));
    components.push(Value::Object(entry));

    let mut out = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
    out.push('\n');
    Ok((out, PatchOutcome::Added))
}

/// Applies the three registrations for a project layout
#[derive(Debug)]
pub struct ConfigPatcher<'a> {
    layout: &'a ProjectLayout,
}

impl<'a> ConfigPatcher<'a> {
    pub fn new(layout: &'a ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn register_filter(&self, name: &str) -> Result<PatchOutcome, ConfigPatchWarning> {
        let anchor = ListAnchor::filter_group(&self.layout.config().filters.group_id);
        self.patch_file(SharedDocument::Filters, &self.layout.filters_path(), |text| {
            patch_list(text, &anchor, name)
        })
    }

    pub fn register_definition(&self, name: &str) -> Result<PatchOutcome, ConfigPatchWarning> {
        let group_id = &self.layout.config().registry.group_id;
        let include = self.layout.registry_include(name);
        self.patch_file(SharedDocument::Registry, &self.layout.registry_path(), |text| {
            patch_registry(text, group_id, &include)
        })
    }

    pub fn register_mapping(&self, name: &str) -> Result<PatchOutcome, ConfigPatchWarning> {
        let anchor = ListAnchor::mapping_list();
        self.patch_file(SharedDocument::Mappings, &self.layout.mappings_path(), |text| {
            patch_list(text, &anchor, name)
        })
    }

    /// Run every registration; failures are collected, never propagated
    pub fn register_all(
        &self,
        name: &str,
    ) -> Vec<(SharedDocument, Result<PatchOutcome, ConfigPatchWarning>)> {
        vec![
            (SharedDocument::Filters, self.register_filter(name)),
            (SharedDocument::Registry, self.register_definition(name)),
            (SharedDocument::Mappings, self.register_mapping(name)),
        ]
    }

    fn patch_file<F>(
        &self,
        document: SharedDocument,
        path: &Path,
        patch: F,
    ) -> Result<PatchOutcome, ConfigPatchWarning>
    where
        F: FnOnce(&str) -> Result<(String, PatchOutcome), String>,
    {
        let warning = |reason: String| {
            warn!(document = %document, path = %path.display(), %reason, "Config patch failed");
            ConfigPatchWarning {
                document,
                path: path.to_path_buf(),
                reason,
            }
        };

        let text = fs::read_to_string(path).map_err(|e| warning(e.to_string()))?;
        let (patched, outcome) = patch(&text).map_err(&warning)?;

        if outcome == PatchOutcome::Added {
            fs::write(path, patched).map_err(|e| warning(e.to_string()))?;
            info!(document = %document, path = %path.display(), "Registered component");
        }

        Ok(outcome)
    }
}
