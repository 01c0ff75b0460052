//! Base component catalog
//!
//! Loads `_<identifier>.json` documents from the base components directory.
//! Each catalog owns its own cache; construct one per invocation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Identifier of the structural container used as the base for composites
pub const PANEL_IDENTIFIER: &str = "panel";

const FILE_PREFIX: &str = "_";
const FILE_SUFFIX: &str = ".json";

/// A parsed base component document. `definitions` is never empty.
#[derive(Debug, Clone)]
pub struct BaseComponent {
    pub filename: String,
    pub identifier: String,
    pub definitions: Vec<Value>,
    pub models: Vec<Value>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    definitions: Option<Vec<Value>>,
    #[serde(default)]
    models: Vec<Value>,
}

impl BaseComponent {
    /// First definition
    pub fn definition(&self) -> &Value {
        &self.definitions[0]
    }

    /// First model, if the document has any
    pub fn model(&self) -> Option<&Value> {
        self.models.first()
    }

    /// Human-readable title from the first definition
    pub fn title(&self) -> Option<&str> {
        self.definition().get("title").and_then(Value::as_str)
    }

    /// Identifier declared by the first definition
    pub fn definition_id(&self) -> Option<&str> {
        self.definition().get("id").and_then(Value::as_str)
    }

    /// Title for display, falling back to the identifier
    pub fn label(&self) -> &str {
        self.title().unwrap_or(&self.identifier)
    }

    /// Template region of the first definition
    pub fn template(&self) -> Result<&Map<String, Value>> {
        template_of(self.definition()).ok_or_else(|| {
            ScaffoldError::invalid_schema(
                &self.identifier,
                "missing plugins.xwalk.page.template",
            )
        })
    }

    /// `plugins.xwalk.page.resourceType` of the first definition
    pub fn resource_type(&self) -> Option<&Value> {
        page_of(self.definition()).and_then(|page| page.get("resourceType"))
    }
}

pub(crate) fn page_of(definition: &Value) -> Option<&Map<String, Value>> {
    definition
        .pointer("/plugins/xwalk/page")
        .and_then(Value::as_object)
}

pub(crate) fn template_of(definition: &Value) -> Option<&Map<String, Value>> {
    definition
        .pointer("/plugins/xwalk/page/template")
        .and_then(Value::as_object)
}

/// Map an identifier (or an exact filename) to the document filename
pub fn filename_for(identifier: &str) -> String {
    if identifier.ends_with(FILE_SUFFIX) {
        identifier.to_string()
    } else {
        format!("{FILE_PREFIX}{identifier}{FILE_SUFFIX}")
    }
}

fn identifier_for(filename: &str) -> String {
    filename
        .strip_suffix(FILE_SUFFIX)
        .unwrap_or(filename)
        .trim_start_matches(FILE_PREFIX)
        .to_string()
}

/// Outcome of enumerating the catalog directory
#[derive(Debug, Default)]
pub struct CatalogListing {
    /// Successfully loaded components, sorted by title
    pub components: Vec<Arc<BaseComponent>>,
    /// Files that could not be used, with the reason
    pub skipped: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct ComponentCatalog {
    dir: PathBuf,
    /// Keyed by the exact string passed to `load`
    cache: HashMap<String, Arc<BaseComponent>>,
}

impl ComponentCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a base component by identifier (`radio-group`) or filename (`_radio-group.json`)
    pub fn load(&mut self, identifier: &str) -> Result<Arc<BaseComponent>> {
        if let Some(component) = self.cache.get(identifier) {
            debug!(identifier, "Catalog cache hit");
            return Ok(Arc::clone(component));
        }

        let filename = filename_for(identifier);
        let path = self.dir.join(&filename);

        if !path.is_file() {
            return Err(ScaffoldError::not_found(identifier, path));
        }

        let content = fs::read_to_string(&path)?;
        let raw: RawDocument = serde_json::from_str(&content)
            .map_err(|e| ScaffoldError::json(path.display().to_string(), e))?;

        let definitions = match raw.definitions {
            Some(defs) if !defs.is_empty() => defs,
            Some(_) => {
                return Err(ScaffoldError::invalid_schema(
                    identifier,
                    "definitions array is empty",
                ))
            }
            None => {
                return Err(ScaffoldError::invalid_schema(
                    identifier,
                    "definitions array is missing",
                ))
            }
        };

        let component = Arc::new(BaseComponent {
            identifier: identifier_for(&filename),
            filename,
            definitions,
            models: raw.models,
        });

        debug!(identifier, file = %component.filename, "Loaded base component");
        self.cache.insert(identifier.to_string(), Arc::clone(&component));
        Ok(component)
    }

    /// The panel component every composite is built on
    pub fn panel(&mut self) -> Result<Arc<BaseComponent>> {
        self.load(PANEL_IDENTIFIER)
    }

    /// Load every definition document in the directory.
    ///
    /// Unreadable, malformed or untitled documents are skipped rather than
    /// failing the whole listing.
    pub fn list_all(&mut self) -> Result<CatalogListing> {
        let mut listing = CatalogListing::default();

        if !self.dir.is_dir() {
            return Err(ScaffoldError::not_found(
                "base components directory",
                self.dir.clone(),
            ));
        }

        let mut filenames: Vec<String> = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX))
            .collect();
        filenames.sort();

        for filename in filenames {
            match self.load(&filename) {
                Ok(component) if component.title().is_none() => {
                    listing.skipped.push((filename, "missing title".to_string()));
                }
                Ok(component) if component.definition_id().is_none() => {
                    listing.skipped.push((filename, "missing id".to_string()));
                }
                Ok(component) => listing.components.push(component),
                Err(err) => {
                    warn!(file = %filename, error = %err, "Skipping base component");
                    listing.skipped.push((filename, err.to_string()));
                }
            }
        }

        listing.components.sort_by(|a, b| a.label().cmp(b.label()));

        Ok(listing)
    }

    #[cfg(test)]
    pub(crate) fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_component(dir: &Path, identifier: &str, title: &str) {
        let doc = json!({
            "definitions": [{
                "title": title,
                "id": identifier,
                "plugins": {"xwalk": {"page": {
                    "resourceType": "core/fd/components/form/textinput/v1/textinput",
                    "template": {"jcr:title": title, "fieldType": identifier}
                }}}
            }],
            "models": [{"id": identifier, "fields": []}]
        });
        fs::write(
            dir.join(format!("_{identifier}.json")),
            serde_json::to_string_pretty(&doc).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_filename_for() {
        assert_eq!(filename_for("radio-group"), "_radio-group.json");
        assert_eq!(filename_for("_radio-group.json"), "_radio-group.json");
    }

    #[test]
    fn test_load_caches_by_requested_key() {
        let temp = TempDir::new().unwrap();
        write_component(temp.path(), "email", "Email Input");

        let mut catalog = ComponentCatalog::new(temp.path());
        let first = catalog.load("email").unwrap();
        let second = catalog.load("email").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.cache_len(), 1);

        // same document via its filename is a second cache entry
        let by_file = catalog.load("_email.json").unwrap();
        assert_eq!(by_file.identifier, "email");
        assert_eq!(catalog.cache_len(), 2);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let mut catalog = ComponentCatalog::new(temp.path());

        let err = catalog.load("nope").unwrap_err();
        assert!(matches!(err, ScaffoldError::NotFound { .. }));
    }

    #[test]
    fn test_load_rejects_empty_definitions() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("_broken.json"), r#"{"definitions": [], "models": []}"#)
            .unwrap();
        fs::write(temp.path().join("_bare.json"), r#"{"models": []}"#).unwrap();

        let mut catalog = ComponentCatalog::new(temp.path());
        assert!(matches!(
            catalog.load("broken").unwrap_err(),
            ScaffoldError::InvalidSchema { .. }
        ));
        assert!(matches!(
            catalog.load("bare").unwrap_err(),
            ScaffoldError::InvalidSchema { .. }
        ));
        assert_eq!(catalog.cache_len(), 0);
    }

    #[test]
    fn test_list_all_sorted_by_title_and_skips_bad_files() {
        let temp = TempDir::new().unwrap();
        write_component(temp.path(), "text-input", "Text Input");
        write_component(temp.path(), "button", "Button");
        write_component(temp.path(), "email", "Email Input");
        fs::write(temp.path().join("_broken.json"), "{ not json").unwrap();
        fs::write(
            temp.path().join("_untitled.json"),
            r#"{"definitions": [{"id": "untitled"}]}"#,
        )
        .unwrap();
        fs::write(temp.path().join("README.md"), "ignored").unwrap();

        let mut catalog = ComponentCatalog::new(temp.path());
        let listing = catalog.list_all().unwrap();

        let titles: Vec<_> = listing.components.iter().map(|c| c.label()).collect();
        assert_eq!(titles, vec!["Button", "Email Input", "Text Input"]);
        assert_eq!(listing.skipped.len(), 2);

        // enumeration fills the cache under the filenames it loaded
        assert!(catalog.cache_len() >= 3);
    }

    #[test]
    fn test_template_missing_is_invalid_schema() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("_plain.json"),
            r#"{"definitions": [{"id": "plain", "title": "Plain"}]}"#,
        )
        .unwrap();

        let mut catalog = ComponentCatalog::new(temp.path());
        let component = catalog.load("plain").unwrap();
        assert!(matches!(
            component.template().unwrap_err(),
            ScaffoldError::InvalidSchema { .. }
        ));
    }
}
