//! Component synthesis
//!
//! Builds the schema document of a new component from one base component
//! (simple) or from the panel plus an ordered list of children (composite).
//! Errors name the offending base component; the pipeline wraps them with the
//! target name.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{template_of, BaseComponent, ComponentCatalog};
use crate::error::{Result, ScaffoldError};
use crate::naming::{display_title, field_key};
use crate::rewrite::PathRewriter;

const TITLE_KEY: &str = "jcr:title";
const VIEW_TYPE_KEY: &str = "fd:viewType";
const FIELD_TYPE_KEY: &str = "fieldType";
const RESOURCE_TYPE_KEY: &str = "sling:resourceType";
const TEMPLATE_POINTER: &str = "/plugins/xwalk/page/template";

/// Maximum number of children a composite can be built from
pub const MAX_COMPOSITE_CHILDREN: usize = 10;

/// Schema document of a generated component. `id` is always the target name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedComponent {
    pub definitions: Vec<Value>,
    pub models: Vec<Value>,
}

impl GeneratedComponent {
    /// Template region of the first definition
    pub fn template(&self) -> Option<&Map<String, Value>> {
        self.definitions.first().and_then(template_of)
    }

    /// Pretty-printed document with a trailing newline
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)
            .map_err(|e| ScaffoldError::json("generated component", e))?;
        out.push('\n');
        Ok(out)
    }
}

/// One selected child of a composite, in selection order
#[derive(Debug, Clone)]
pub struct CompositeChild {
    pub component: Arc<BaseComponent>,
    pub title: String,
}

/// Extend a single base component under a new name
pub fn synthesize_simple(
    target: &str,
    base: &BaseComponent,
    rewriter: &PathRewriter,
) -> Result<GeneratedComponent> {
    let title = display_title(target);

    let definitions = base
        .definitions
        .iter()
        .map(|definition| {
            let mut definition = definition.clone();
            override_identity(&mut definition, target, &title, &base.identifier)?;

            let template = template_mut(&mut definition, &base.identifier)?;
            template.insert(TITLE_KEY.to_string(), Value::String(title.clone()));
            template.insert(VIEW_TYPE_KEY.to_string(), Value::String(target.to_string()));
            Ok(definition)
        })
        .collect::<Result<Vec<_>>>()?;

    let models = base
        .models
        .iter()
        .map(|model| model_for(model, target, rewriter))
        .collect();

    Ok(GeneratedComponent {
        definitions,
        models,
    })
}

/// Build a panel-based container holding `children` as fixed sub-fields.
///
/// `children` must not be empty. Field keys get a 1-based positional suffix
/// whenever more than one child is present.
pub fn synthesize_composite(
    target: &str,
    catalog: &mut ComponentCatalog,
    children: &[CompositeChild],
    rewriter: &PathRewriter,
) -> Result<GeneratedComponent> {
    let panel = catalog.panel()?;
    let title = display_title(target);

    let mut template = panel.template()?.clone();
    template.insert(TITLE_KEY.to_string(), Value::String(title.clone()));
    template.insert(VIEW_TYPE_KEY.to_string(), Value::String(target.to_string()));

    let suffixed = children.len() > 1;
    for (index, child) in children.iter().enumerate() {
        let mut key = field_key(&child.component.identifier);
        if suffixed {
            key.push_str(&(index + 1).to_string());
        }
        template.insert(key, Value::Object(child_entry(child)?));
    }

    let mut definition = panel.definition().clone();
    override_identity(&mut definition, target, &title, &panel.identifier)?;
    *template_mut(&mut definition, &panel.identifier)? = template;

    let models = panel
        .model()
        .map(|model| model_for(model, target, rewriter))
        .into_iter()
        .collect();

    Ok(GeneratedComponent {
        definitions: vec![definition],
        models,
    })
}

/// Resource/field type markers, then the child's own template, then the title
fn child_entry(child: &CompositeChild) -> Result<Map<String, Value>> {
    let base = &child.component;
    let inherited = base.template()?;

    let mut entry = Map::new();
    if let Some(resource_type) = base.resource_type() {
        entry.insert(RESOURCE_TYPE_KEY.to_string(), resource_type.clone());
    }
    if let Some(field_type) = inherited.get(FIELD_TYPE_KEY) {
        entry.insert(FIELD_TYPE_KEY.to_string(), field_type.clone());
    }
    for (key, value) in inherited {
        entry.insert(key.clone(), value.clone());
    }
    entry.insert(TITLE_KEY.to_string(), Value::String(child.title.clone()));

    Ok(entry)
}

fn override_identity(definition: &mut Value, target: &str, title: &str, base: &str) -> Result<()> {
    let object = definition
        .as_object_mut()
        .ok_or_else(|| ScaffoldError::invalid_schema(base, "definition is not an object"))?;
    object.insert("title".to_string(), Value::String(title.to_string()));
    object.insert("id".to_string(), Value::String(target.to_string()));
    Ok(())
}

fn template_mut<'a>(definition: &'a mut Value, base: &str) -> Result<&'a mut Map<String, Value>> {
    definition
        .pointer_mut(TEMPLATE_POINTER)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ScaffoldError::invalid_schema(base, "missing plugins.xwalk.page.template"))
}

fn model_for(model: &Value, target: &str, rewriter: &PathRewriter) -> Value {
    let mut model = rewriter.rewrite(model);
    if let Some(object) = model.as_object_mut() {
        object.insert("id".to_string(), Value::String(target.to_string()));
    }
    model
}
