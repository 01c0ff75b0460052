//! Wizard Mode - interactive component creation
//!
//! Running `fieldctl` with no subcommand walks through the same choices the
//! `simple` and `composite` subcommands take as arguments, shows a summary and
//! asks for confirmation before anything is written.
//!
//! # Example
//!
//! ```text
//! $ fieldctl
//!
//! 🧙 Custom Component Wizard
//!
//! ? Component kind: Composite - several fields grouped in a panel
//! ? Component name: contact form
//! ? Toggle components (in the order they should appear): ✔ Done (2 selected)
//! ? Display name for Text Input: Full Name
//! ? Display name for Email Input: Email Input
//! ? Create component 'contact-form'? Yes
//!
//! 📋 Equivalent command:
//!    fieldctl composite contact-form 'text-input:Full Name' email
//! ```

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use fieldctl_core::{
    naming, BaseComponent, ComponentRequest, ComponentSpec, ScaffoldPlan, Scaffolder,
    MAX_COMPOSITE_CHILDREN,
};
use inquire::validator::Validation;
use inquire::{Confirm, InquireError, Select, Text};

use crate::ui;

const KIND_SIMPLE: &str = "Simple - extend one base component";
const KIND_COMPOSITE: &str = "Composite - several fields grouped in a panel";

/// Check if we're in a context where wizard mode is available (interactive TTY)
pub fn can_use_wizard() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// How an interactive session ended
#[derive(Debug)]
pub enum WizardOutcome {
    Created,
    /// Confirmed under `--dry-run`; nothing was written
    DryRun,
    Cancelled,
}

/// Chronological record of toggled selections.
///
/// Toggling off removes an entry; toggling it on again appends it at the end,
/// so the order reflects when each option was (last) chosen, not where it sits
/// in the list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionOrder {
    picked: Vec<usize>,
}

impl SelectionOrder {
    /// Flip `index`; returns whether it is now selected
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.position(index) {
            Some(pos) => {
                self.picked.remove(pos);
                false
            }
            None => {
                self.picked.push(index);
                true
            }
        }
    }

    /// 0-based place of `index` in the selection order, if selected
    pub fn position(&self, index: usize) -> Option<usize> {
        self.picked.iter().position(|&i| i == index)
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.picked
    }
}

/// Run the wizard end to end: collect, summarize, confirm, apply
pub fn run_wizard(scaffolder: &mut Scaffolder, dry_run: bool) -> Result<WizardOutcome> {
    if !can_use_wizard() {
        bail!(
            "Interactive mode needs a terminal. \
             Use `fieldctl simple` or `fieldctl composite` instead."
        );
    }

    match interact(scaffolder, dry_run) {
        Err(err) if is_cancellation(&err) => {
            println!("\n👋 Cancelled, nothing was written.");
            Ok(WizardOutcome::Cancelled)
        }
        other => other,
    }
}

fn interact(scaffolder: &mut Scaffolder, dry_run: bool) -> Result<WizardOutcome> {
    println!("\n🧙 Custom Component Wizard\n");

    let listing = scaffolder
        .catalog_mut()
        .list_all()
        .context("Failed to load base components")?;
    if listing.components.is_empty() {
        bail!("No base components found in {}", scaffolder.catalog_mut().dir().display());
    }

    let kind = Select::new("Component kind:", vec![KIND_SIMPLE, KIND_COMPOSITE])
        .prompt()
        .context("Failed to select component kind")?;

    let name = prompt_name(scaffolder)?;

    let request = if kind == KIND_SIMPLE {
        let base = prompt_base(&listing.components)?;
        ComponentRequest::Simple {
            name,
            base: base.identifier.clone(),
        }
    } else {
        let order = prompt_children(&listing.components)?;
        let children = prompt_child_names(&listing.components, &order)?;
        ComponentRequest::Composite { name, children }
    };

    let plan = scaffolder.plan(&request)?;
    ui::render_plan(&plan, scaffolder.layout().root());

    let confirmed = Confirm::new(&format!("Create component '{}'?", plan.name))
        .with_default(true)
        .prompt()
        .context("Failed to get confirmation")?;
    if !confirmed {
        println!("👋 Cancelled, nothing was written.");
        return Ok(WizardOutcome::Cancelled);
    }

    print_equivalent_command(&request.to_args());
    finish(scaffolder, &plan, dry_run)
}

/// Apply a confirmed plan, or stop short of writing under `--dry-run`
fn finish(scaffolder: &Scaffolder, plan: &ScaffoldPlan, dry_run: bool) -> Result<WizardOutcome> {
    if dry_run {
        println!("🔍 Dry run: nothing written");
        return Ok(WizardOutcome::DryRun);
    }

    let report = scaffolder.apply(plan)?;
    ui::render_report(&report, scaffolder.layout().root());
    Ok(WizardOutcome::Created)
}

fn prompt_name(scaffolder: &Scaffolder) -> Result<String> {
    let components_dir = scaffolder.layout().components_dir();

    let raw = Text::new("Component name:")
        .with_help_message(
            "Lowercase letters, digits, '-' and '_' (e.g. 'icon radio' becomes 'icon-radio')",
        )
        .with_validator(move |input: &str| {
            Ok(match naming::validate(input, &components_dir) {
                Ok(_) => Validation::Valid,
                Err(violation) => Validation::Invalid(violation.to_string().into()),
            })
        })
        .prompt()
        .context("Failed to get component name")?;

    Ok(naming::transform(&raw))
}

fn option_label(component: &BaseComponent) -> String {
    format!("{} ({})", component.label(), component.identifier)
}

fn prompt_base(components: &[Arc<BaseComponent>]) -> Result<Arc<BaseComponent>> {
    let options: Vec<String> = components.iter().map(|c| option_label(c)).collect();
    let choice = Select::new("Base component:", options)
        .with_help_message("The new component starts as a copy of this one")
        .raw_prompt()
        .context("Failed to select base component")?;

    Ok(Arc::clone(&components[choice.index]))
}

/// Toggle loop that records selection order
fn prompt_children(components: &[Arc<BaseComponent>]) -> Result<SelectionOrder> {
    let mut order = SelectionOrder::default();
    let mut cursor = 0;

    loop {
        let mut options: Vec<String> = components
            .iter()
            .enumerate()
            .map(|(index, component)| match order.position(index) {
                Some(pos) => format!("[{}] {}", pos + 1, option_label(component)),
                None => format!("[ ] {}", option_label(component)),
            })
            .collect();
        options.push(format!("✔ Done ({} selected)", order.len()));

        let choice = Select::new("Toggle components (in the order they should appear):", options)
            .with_starting_cursor(cursor)
            .with_page_size(12)
            .raw_prompt()
            .context("Failed to select components")?;
        cursor = choice.index;

        if choice.index == components.len() {
            if order.is_empty() {
                println!("⚠️  Select at least one component.");
                continue;
            }
            return Ok(order);
        }

        if order.position(choice.index).is_none() && order.len() >= MAX_COMPOSITE_CHILDREN {
            println!("⚠️  A composite can hold at most {MAX_COMPOSITE_CHILDREN} components.");
            continue;
        }
        order.toggle(choice.index);
    }
}

fn prompt_child_names(
    components: &[Arc<BaseComponent>],
    order: &SelectionOrder,
) -> Result<Vec<ComponentSpec>> {
    order
        .indices()
        .iter()
        .map(|&index| {
            let component = &components[index];
            let label = component.label();
            let input = Text::new(&format!("Display name for {label}:"))
                .with_default(label)
                .prompt()
                .context("Failed to get display name")?;

            let input = input.trim();
            let custom_name = (!input.is_empty() && input != label).then(|| input.to_string());
            Ok(ComponentSpec::new(component.identifier.clone(), custom_name))
        })
        .collect()
}

fn is_cancellation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<InquireError>(),
            Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
        )
    })
}

/// Print the equivalent programmatic command
///
/// Uses POSIX shell escaping via shlex so names with spaces or quotes
/// can be pasted back into a shell.
pub fn print_equivalent_command(args: &[String]) {
    let escaped: Vec<String> = args
        .iter()
        .map(|arg| {
            shlex::try_quote(arg)
                .map(|quoted| quoted.into_owned())
                .unwrap_or_else(|_| arg.clone())
        })
        .collect();

    println!("\n📋 Equivalent command:");
    println!("   fieldctl {}\n", escaped.join(" "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldctl_core::{LayoutConfig, ProjectLayout};
    use tempfile::TempDir;

    fn scaffolder_with_email() -> (TempDir, Scaffolder) {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path(), LayoutConfig::default());
        let base_dir = layout.base_components_dir();
        std::fs::create_dir_all(&base_dir).unwrap();
        let doc = serde_json::json!({
            "definitions": [{
                "title": "Email Input",
                "id": "email",
                "plugins": {"xwalk": {"page": {
                    "resourceType": "core/fd/components/form/email/v1/email",
                    "template": {"jcr:title": "Email Input", "fieldType": "email"}
                }}}
            }],
            "models": [{"id": "email", "fields": []}]
        });
        std::fs::write(base_dir.join("_email.json"), doc.to_string()).unwrap();
        (temp, Scaffolder::new(layout))
    }

    #[test]
    fn test_confirmed_dry_run_writes_nothing() {
        let (_temp, mut scaffolder) = scaffolder_with_email();
        let request = ComponentRequest::Simple {
            name: "work-email".to_string(),
            base: "email".to_string(),
        };
        let plan = scaffolder.plan(&request).unwrap();

        let outcome = finish(&scaffolder, &plan, true).unwrap();
        assert!(matches!(outcome, WizardOutcome::DryRun));
        assert!(!plan.dir.exists());

        let outcome = finish(&scaffolder, &plan, false).unwrap();
        assert!(matches!(outcome, WizardOutcome::Created));
        assert!(plan.dir.is_dir());
    }

    #[test]
    fn test_selection_order_is_chronological() {
        let mut order = SelectionOrder::default();
        assert!(order.toggle(3));
        assert!(order.toggle(0));
        assert!(order.toggle(2));
        assert_eq!(order.indices(), &[3, 0, 2]);
    }

    #[test]
    fn test_selection_order_retoggle_appends() {
        let mut order = SelectionOrder::default();
        order.toggle(1);
        order.toggle(2);
        order.toggle(3);

        assert!(!order.toggle(1));
        assert_eq!(order.indices(), &[2, 3]);

        assert!(order.toggle(1));
        assert_eq!(order.indices(), &[2, 3, 1]);
        assert_eq!(order.position(1), Some(2));
    }

    #[test]
    fn test_cancellation_detection() {
        let err = anyhow::Error::new(InquireError::OperationCanceled).context("Failed to get name");
        assert!(is_cancellation(&err));

        let err = anyhow::anyhow!("something else");
        assert!(!is_cancellation(&err));
    }
}
