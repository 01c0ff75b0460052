pub mod catalog;
pub mod error;
pub mod layout;
pub mod naming;
pub mod patch;
pub mod request;
pub mod rewrite;
pub mod scaffold;
pub mod stubs;
pub mod synth;

pub use catalog::{BaseComponent, CatalogListing, ComponentCatalog};
pub use error::{Result, ScaffoldError};
pub use layout::{LayoutConfig, ProjectLayout};
pub use naming::{display_title, transform, validate, NameViolation};
pub use patch::{ConfigPatchWarning, ConfigPatcher, PatchOutcome, SharedDocument};
pub use request::{parse_specs, ComponentRequest, ComponentSpec};
pub use rewrite::PathRewriter;
pub use scaffold::{PlannedFile, ScaffoldPlan, ScaffoldReport, Scaffolder};
pub use synth::{CompositeChild, GeneratedComponent, MAX_COMPOSITE_CHILDREN};
