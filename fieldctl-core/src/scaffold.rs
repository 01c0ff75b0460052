//! Scaffolding pipeline: validate → load → synthesize → write → register
//!
//! `plan` has no side effects, so a caller can show the result and ask for
//! confirmation before `apply` touches the filesystem. Every rejection
//! (bad name, unknown base, broken schema, conflict) happens before the
//! component directory is created.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::catalog::ComponentCatalog;
use crate::error::{Result, ScaffoldError};
use crate::layout::{schema_filename, ProjectLayout};
use crate::naming::{self, display_title, NameViolation};
use crate::patch::{ConfigPatchWarning, ConfigPatcher, PatchOutcome, SharedDocument};
use crate::request::{ComponentRequest, ComponentSpec};
use crate::rewrite::PathRewriter;
use crate::stubs::{behavior_stub, style_stub, StubOrigin};
use crate::synth::{
    synthesize_composite, synthesize_simple, CompositeChild, GeneratedComponent,
    MAX_COMPOSITE_CHILDREN,
};

/// A file the plan will create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Everything `apply` needs, computed up front
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub name: String,
    pub title: String,
    pub origin: StubOrigin,
    pub component: GeneratedComponent,
    pub dir: PathBuf,
    pub files: Vec<PlannedFile>,
}

/// Result of applying a plan
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub registrations: Vec<(SharedDocument, PatchOutcome)>,
    pub warnings: Vec<ConfigPatchWarning>,
}

#[derive(Debug)]
pub struct Scaffolder {
    layout: ProjectLayout,
    catalog: ComponentCatalog,
    rewriter: PathRewriter,
}

impl Scaffolder {
    pub fn new(layout: ProjectLayout) -> Self {
        let catalog = ComponentCatalog::new(layout.base_components_dir());
        let rewriter = PathRewriter::from_config(&layout.config().fragments);
        Self {
            layout,
            catalog,
            rewriter,
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn catalog_mut(&mut self) -> &mut ComponentCatalog {
        &mut self.catalog
    }

    /// Normalize and validate a raw name, mapping violations onto the error taxonomy
    pub fn validate_name(&self, raw: &str) -> Result<String> {
        naming::validate(raw, &self.layout.components_dir()).map_err(|violation| match violation {
            NameViolation::AlreadyExists { name } => {
                let path = self.layout.component_dir(&name);
                ScaffoldError::name_conflict(name, path)
            }
            other => ScaffoldError::validation(other.to_string()),
        })
    }

    /// Validate the request and synthesize the component without writing anything
    pub fn plan(&mut self, request: &ComponentRequest) -> Result<ScaffoldPlan> {
        let name = self.validate_name(request.name())?;

        let (component, origin) = match request {
            ComponentRequest::Simple { base, .. } => {
                let base = self.catalog.load(base)?;
                let component = synthesize_simple(&name, &base, &self.rewriter)
                    .map_err(|e| ScaffoldError::synthesis(&name, e))?;
                let origin = StubOrigin::Simple {
                    base: base.label().to_string(),
                };
                (component, origin)
            }
            ComponentRequest::Composite { children, .. } => {
                let children = self.resolve_children(children)?;
                let component =
                    synthesize_composite(&name, &mut self.catalog, &children, &self.rewriter)
                        .map_err(|e| ScaffoldError::synthesis(&name, e))?;
                let origin = StubOrigin::Composite {
                    children: children
                        .iter()
                        .map(|child| child.component.identifier.clone())
                        .collect(),
                };
                (component, origin)
            }
        };

        let dir = self.layout.component_dir(&name);
        let files = vec![
            PlannedFile {
                path: dir.join(format!("{name}.js")),
                contents: behavior_stub(&name, &origin),
            },
            PlannedFile {
                path: dir.join(format!("{name}.css")),
                contents: style_stub(&name),
            },
            PlannedFile {
                path: dir.join(schema_filename(&name)),
                contents: component.to_json_pretty()?,
            },
        ];

        debug!(name = %name, dir = %dir.display(), "Planned component");

        Ok(ScaffoldPlan {
            title: display_title(&name),
            name,
            origin,
            component,
            dir,
            files,
        })
    }

    fn resolve_children(&mut self, specs: &[ComponentSpec]) -> Result<Vec<CompositeChild>> {
        if specs.is_empty() || specs.len() > MAX_COMPOSITE_CHILDREN {
            return Err(ScaffoldError::validation(format!(
                "A composite needs between 1 and {MAX_COMPOSITE_CHILDREN} components, got {}",
                specs.len()
            )));
        }

        specs
            .iter()
            .map(|spec| {
                let component = self.catalog.load(&spec.identifier).map_err(|e| match e {
                    ScaffoldError::NotFound { identifier, .. } => {
                        ScaffoldError::validation(format!("Unknown component '{identifier}'"))
                    }
                    other => other,
                })?;
                let title = spec
                    .custom_name
                    .clone()
                    .unwrap_or_else(|| component.label().to_string());
                Ok(CompositeChild { component, title })
            })
            .collect()
    }

    /// Create the component directory and files, then register the component.
    ///
    /// Registration failures become warnings in the report; they never undo
    /// the files already written.
    pub fn apply(&self, plan: &ScaffoldPlan) -> Result<ScaffoldReport> {
        if let Some(parent) = plan.dir.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::create_dir(&plan.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ScaffoldError::name_conflict(&plan.name, &plan.dir));
            }
            Err(e) => return Err(e.into()),
        }

        if let Err(e) = write_files(&plan.files) {
            // leave nothing half-written behind
            if let Err(cleanup) = fs::remove_dir_all(&plan.dir) {
                warn!(
                    dir = %plan.dir.display(),
                    error = %cleanup,
                    "Failed to remove partially written component"
                );
            }
            return Err(e);
        }

        for file in &plan.files {
            info!(path = %file.path.display(), "Created");
        }

        let mut registrations = Vec::new();
        let mut warnings = Vec::new();
        for (document, result) in ConfigPatcher::new(&self.layout).register_all(&plan.name) {
            match result {
                Ok(outcome) => registrations.push((document, outcome)),
                Err(warning) => warnings.push(warning),
            }
        }

        Ok(ScaffoldReport {
            name: plan.name.clone(),
            dir: plan.dir.clone(),
            files: plan.files.iter().map(|f| f.path.clone()).collect(),
            registrations,
            warnings,
        })
    }
}

fn write_files(files: &[PlannedFile]) -> Result<()> {
    for file in files {
        fs::write(&file.path, &file.contents)?;
    }
    Ok(())
}
