//! Programmatic component creation
//!
//! Commands: simple, composite

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use fieldctl_core::{parse_specs, ComponentRequest, Scaffolder};
use tracing::debug;

use crate::ui;

#[derive(Parser, Debug)]
pub struct SimpleArgs {
    /// Name of the new component (alternative to the first positional)
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Base component identifier, e.g. radio-group (alternative to the second positional)
    #[arg(long, short = 'b')]
    base: Option<String>,

    /// NAME BASE
    #[arg(value_name = "ARGS")]
    positional: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct CompositeArgs {
    /// Name of the new component (alternative to the first positional)
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Child components as identifier[:Custom Name], comma-separated or repeated
    #[arg(long, short = 'c', value_name = "SPEC", num_args = 1..)]
    components: Vec<String>,

    /// NAME SPEC...
    #[arg(value_name = "ARGS")]
    positional: Vec<String>,
}

impl SimpleArgs {
    pub fn into_request(self) -> Result<ComponentRequest> {
        let mut positional = self.positional.into_iter();
        let name = self
            .name
            .or_else(|| positional.next())
            .ok_or_else(|| anyhow!("Missing component name"))?;
        let base = self
            .base
            .or_else(|| positional.next())
            .ok_or_else(|| anyhow!("Missing base component identifier"))?;

        let extra: Vec<String> = positional.collect();
        if !extra.is_empty() {
            bail!("Unexpected arguments: {}", extra.join(" "));
        }

        Ok(ComponentRequest::Simple { name, base })
    }
}

impl CompositeArgs {
    pub fn into_request(self) -> Result<ComponentRequest> {
        let mut positional = self.positional;
        let name = match self.name {
            Some(name) => name,
            None if !positional.is_empty() => positional.remove(0),
            None => bail!("Missing component name"),
        };

        let specs = if self.components.is_empty() {
            positional
        } else if positional.is_empty() {
            self.components
        } else {
            bail!("Pass child components either with --components or positionally, not both");
        };

        if specs.is_empty() {
            bail!("A composite needs at least one component spec (identifier[:Custom Name])");
        }

        let children = parse_specs(&specs)?;
        Ok(ComponentRequest::Composite { name, children })
    }
}

/// Plan and apply a request without confirmation
pub fn run_create(
    scaffolder: &mut Scaffolder,
    request: ComponentRequest,
    dry_run: bool,
) -> Result<()> {
    debug!(?request, "Programmatic create");
    let plan = scaffolder.plan(&request)?;
    let root = scaffolder.layout().root().to_path_buf();

    if dry_run {
        ui::render_plan(&plan, &root);
        println!("🔍 Dry run: nothing written");
        return Ok(());
    }

    let report = scaffolder.apply(&plan)?;
    ui::render_report(&report, &root);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: TestCommand,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestCommand {
        Simple(SimpleArgs),
        Composite(CompositeArgs),
    }

    fn request(args: &[&str]) -> Result<ComponentRequest> {
        let cli = TestCli::try_parse_from(std::iter::once("fieldctl").chain(args.iter().copied()))?;
        match cli.command {
            TestCommand::Simple(args) => args.into_request(),
            TestCommand::Composite(args) => args.into_request(),
        }
    }

    #[test]
    fn test_simple_positional_and_flags_agree() {
        let expected = ComponentRequest::Simple {
            name: "icon radio".to_string(),
            base: "radio-group".to_string(),
        };
        assert_eq!(request(&["simple", "icon radio", "radio-group"]).unwrap(), expected);
        assert_eq!(
            request(&["simple", "--name", "icon radio", "--base", "radio-group"]).unwrap(),
            expected
        );
        assert_eq!(
            request(&["simple", "--base", "radio-group", "icon radio"]).unwrap(),
            expected
        );
    }

    #[test]
    fn test_simple_missing_base() {
        assert!(request(&["simple", "icon-radio"]).is_err());
        assert!(request(&["simple", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_composite_comma_joined_and_separate() {
        let joined = request(&["composite", "survey", "text-input,email:Work Email"]).unwrap();
        let separate = request(&["composite", "survey", "text-input", "email:Work Email"]).unwrap();
        assert_eq!(joined, separate);

        let flagged = request(&[
            "composite",
            "--name",
            "survey",
            "--components",
            "text-input,email:Work Email",
        ])
        .unwrap();
        assert_eq!(flagged, joined);
    }

    #[test]
    fn test_composite_requires_specs() {
        assert!(request(&["composite", "survey"]).is_err());
        assert!(request(&["composite", "survey", "email:"]).is_err());
    }
}
