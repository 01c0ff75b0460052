//! Console rendering for plans, reports and listings

use fieldctl_core::stubs::StubOrigin;
use fieldctl_core::{BaseComponent, PatchOutcome, ScaffoldPlan, ScaffoldReport};
use std::path::Path;

/// Summary shown before anything is written
pub fn render_plan(plan: &ScaffoldPlan, root: &Path) {
    println!("\n📋 Component summary\n");
    println!("   Name:   {}", plan.name);
    println!("   Title:  {}", plan.title);

    match &plan.origin {
        StubOrigin::Simple { base } => {
            println!("   Kind:   simple");
            println!("   Base:   {base}");
        }
        StubOrigin::Composite { .. } => {
            println!("   Kind:   composite (panel)");
            println!("   Fields:");
            if let Some(template) = plan.component.template() {
                for (key, value) in template.iter().filter(|(_, v)| v.is_object()) {
                    let title = value
                        .get("jcr:title")
                        .and_then(|t| t.as_str())
                        .unwrap_or_default();
                    println!("     - {key:<20} {title}");
                }
            }
        }
    }

    println!("   Files:");
    for file in &plan.files {
        println!("     + {}", display_relative(&file.path, root));
    }
    println!();
}

/// Outcome after the plan was applied
pub fn render_report(report: &ScaffoldReport, root: &Path) {
    println!(
        "✅ Created component '{}' in {}",
        report.name,
        display_relative(&report.dir, root)
    );

    for (document, outcome) in &report.registrations {
        match outcome {
            PatchOutcome::Added => println!("   ✓ Registered in {document}"),
            PatchOutcome::AlreadyPresent => println!("   ✓ Already registered in {document}"),
        }
    }

    for warning in &report.warnings {
        eprintln!("⚠️  {warning}");
    }
}

/// One line per base component: title and identifier
pub fn render_components(components: &[std::sync::Arc<BaseComponent>]) {
    println!("\nBase components:\n");
    println!("{:<30} {:<25}", "Title", "Identifier");
    println!("{:-<56}", "");
    for component in components {
        println!("{:<30} {:<25}", component.label(), component.identifier);
    }
    println!();
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
