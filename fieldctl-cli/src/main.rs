//! fieldctl CLI - scaffolding for custom form components
//!
//! - No subcommand: interactive wizard with a summary and confirmation
//! - `simple` / `composite`: programmatic creation, no prompts
//! - `list`: base components available to extend

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fieldctl_core::{ProjectLayout, Scaffolder};
use tracing::debug;

mod commands;
mod tracing_setup;
mod ui;
mod wizard;

use commands::create::{CompositeArgs, SimpleArgs};
use commands::list::ListArgs;

#[derive(Parser, Debug)]
#[command(
    name = "fieldctl",
    author,
    version,
    about = "Scaffold custom form components from the built-in field definitions",
    long_about = "Create custom form components by extending one base component (simple) or \
                  grouping several inside a panel (composite). Generated files land under \
                  blocks/form/components/<name>/ and the component is registered in the \
                  form filter, the component definition registry and the mappings list."
)]
struct Cli {
    /// Project root containing blocks/ and models/
    #[arg(long, global = true, env = "FIELDCTL_ROOT", default_value = ".")]
    root: PathBuf,

    /// Layout config file (default: <root>/fieldctl.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Show what would be created without writing anything
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a component that extends one base component
    Simple(SimpleArgs),
    /// Create a panel-based component grouping several base components
    Composite(CompositeArgs),
    /// List base components that can be extended
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            // usage errors share the validation exit code
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let layout = ProjectLayout::load(&cli.root, cli.config.as_deref())
        .with_context(|| format!("Failed to load project layout from {}", cli.root.display()))?;
    debug!(root = %layout.root().display(), "Project layout loaded");

    let mut scaffolder = Scaffolder::new(layout);

    match cli.command {
        None => {
            let outcome = wizard::run_wizard(&mut scaffolder, cli.dry_run)?;
            debug!(?outcome, "Wizard finished");
        }
        Some(Commands::Simple(args)) => {
            commands::run_create(&mut scaffolder, args.into_request()?, cli.dry_run)?
        }
        Some(Commands::Composite(args)) => {
            commands::run_create(&mut scaffolder, args.into_request()?, cli.dry_run)?
        }
        Some(Commands::List(args)) => commands::run_list(&mut scaffolder, args)?,
    }

    Ok(())
}
