//! Project layout configuration
//!
//! All paths are relative to the project root. An optional `fieldctl.toml`
//! in the root overrides any of the defaults, which match the standard
//! forms boilerplate layout:
//!
//! ```toml
//! [paths]
//! base_components = "blocks/form/models/form-components"
//! components = "blocks/form/components"
//! filters = "blocks/form/_form.json"
//! registry = "models/_component-definition.json"
//! mappings = "blocks/form/mappings.js"
//!
//! [filters]
//! group_id = "form"
//!
//! [registry]
//! group_id = "custom-form-components"
//!
//! [fragments]
//! shared_prefix = "../form-common/"
//! rewritten_prefix = "../../models/form-common/"
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ScaffoldError};

/// Config filename looked up in the project root
pub const CONFIG_FILENAME: &str = "fieldctl.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub paths: PathsConfig,
    pub filters: GroupConfig,
    pub registry: RegistryConfig,
    pub fragments: FragmentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub base_components: PathBuf,
    pub components: PathBuf,
    pub filters: PathBuf,
    pub registry: PathBuf,
    pub mappings: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_components: PathBuf::from("blocks/form/models/form-components"),
            components: PathBuf::from("blocks/form/components"),
            filters: PathBuf::from("blocks/form/_form.json"),
            registry: PathBuf::from("models/_component-definition.json"),
            mappings: PathBuf::from("blocks/form/mappings.js"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupConfig {
    pub group_id: String,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            group_id: "form".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub group_id: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            group_id: "custom-form-components".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FragmentsConfig {
    pub shared_prefix: String,
    pub rewritten_prefix: String,
}

impl Default for FragmentsConfig {
    fn default() -> Self {
        Self {
            shared_prefix: "../form-common/".to_string(),
            rewritten_prefix: "../../models/form-common/".to_string(),
        }
    }
}

/// Resolved project layout: a root directory plus its configuration
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    config: LayoutConfig,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, config: LayoutConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Load the layout for `root`, reading `config_path` if given, else
    /// `<root>/fieldctl.toml` if it exists, else the defaults.
    pub fn load(root: impl Into<PathBuf>, config_path: Option<&Path>) -> Result<Self> {
        let root = root.into();
        let default_path = root.join(CONFIG_FILENAME);

        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None if default_path.exists() => Some(default_path),
            None => None,
        };

        let config = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading layout config");
                let content = fs::read_to_string(&path).map_err(|e| {
                    ScaffoldError::config(format!("failed to read {}: {e}", path.display()))
                })?;
                toml::from_str(&content).map_err(|e| {
                    ScaffoldError::config(format!("invalid TOML in {}: {e}", path.display()))
                })?
            }
            None => LayoutConfig::default(),
        };

        Ok(Self::new(root, config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn base_components_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.base_components)
    }

    pub fn components_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.components)
    }

    /// Directory a component named `name` is generated into
    pub fn component_dir(&self, name: &str) -> PathBuf {
        self.components_dir().join(name)
    }

    pub fn filters_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.filters)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.registry)
    }

    pub fn mappings_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.mappings)
    }

    /// Include path for a component's definitions, as seen from the registry
    /// document's directory, e.g. `../blocks/form/components/x/_x.json#/definitions`
    pub fn registry_include(&self, name: &str) -> String {
        let registry_dir = self
            .config
            .paths
            .registry
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let schema = self
            .config
            .paths
            .components
            .join(name)
            .join(schema_filename(name));

        format!("{}#/definitions", relative_path(&registry_dir, &schema))
    }
}

/// `_<name>.json`
pub fn schema_filename(name: &str) -> String {
    format!("_{name}.json")
}

/// Relative path from directory `from` to `to`, both relative to the same root.
/// Always uses `/` separators since the result ends up inside JSON documents.
fn relative_path(from: &Path, to: &Path) -> String {
    let from: Vec<_> = normal_components(from);
    let to: Vec<_> = normal_components(to);

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(to[common..].iter().cloned());
    parts.join("/")
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
