mod catalog_cmds;
mod config;
mod export_cmd;
mod render;
mod session;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use discovery_core::{Catalog, DiagnosticEngine};

use config::{CliOverrides, DiscoveryConfig};

#[derive(Parser)]
#[command(name = "discovery", about = "Seven-step discovery self-assessment")]
struct Cli {
    /// Steps JSON file (overrides DISCOVERY_STEPS_PATH env var)
    #[arg(long, global = true)]
    steps: Option<PathBuf>,

    /// Activities JSON file (overrides DISCOVERY_ACTIVITIES_PATH env var)
    #[arg(long, global = true)]
    activities: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a discovery config file
    Init {
        /// Directory exported plans are written to
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Walk through the diagnostic interactively
    Run {
        /// Directory exported plans are written to (overrides DISCOVERY_EXPORT_DIR)
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// List the diagnostic steps
    Steps,
    /// List activities
    Activities {
        /// Only show activities in this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the activities recommended for a failed step
    Recommend {
        /// Step key (e.g. framing)
        key: String,
    },
}

/// Execute the `discovery init` command: write config file.
fn cmd_init(cli: &Cli, export_dir: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        data: config::DataSection {
            steps: cli.steps.clone(),
            activities: cli.activities.clone(),
        },
        export: config::ExportSection { dir: export_dir },
    };
    config::save_config_to(&path, &cfg)?;

    println!("Config written to {}", path.display());
    if let Some(ref p) = cfg.data.steps {
        println!("  data.steps = {}", p.display());
    }
    if let Some(ref p) = cfg.data.activities {
        println!("  data.activities = {}", p.display());
    }
    if let Some(ref p) = cfg.export.dir {
        println!("  export.dir = {}", p.display());
    }
    Ok(())
}

fn load_catalog(resolved: &DiscoveryConfig) -> anyhow::Result<Catalog> {
    Catalog::load(
        resolved.steps_path.as_deref(),
        resolved.activities_path.as_deref(),
    )
    .context("failed to load diagnostic data")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut overrides = CliOverrides {
        steps: cli.steps.clone(),
        activities: cli.activities.clone(),
        export_dir: None,
    };

    match cli.command {
        Commands::Init {
            ref export_dir,
            force,
        } => {
            cmd_init(&cli, export_dir.clone(), force)?;
        }
        Commands::Run { ref export_dir } => {
            overrides.export_dir = export_dir.clone();
            let resolved = DiscoveryConfig::resolve(&overrides)?;
            let engine = DiagnosticEngine::from_catalog(load_catalog(&resolved)?);

            let stdin = std::io::stdin();
            let mut session = session::Session::new(
                engine,
                stdin.lock(),
                std::io::stdout().lock(),
                resolved.export_dir,
            );
            session.run()?;
            debug!(
                entries = session.engine().plan().len(),
                exported = session.exported().len(),
                "session finished"
            );
        }
        Commands::Steps => {
            let resolved = DiscoveryConfig::resolve(&overrides)?;
            let catalog = load_catalog(&resolved)?;
            catalog_cmds::run_steps(&catalog, &mut std::io::stdout().lock())?;
        }
        Commands::Activities { ref category } => {
            let resolved = DiscoveryConfig::resolve(&overrides)?;
            let catalog = load_catalog(&resolved)?;
            catalog_cmds::run_activities(
                &catalog,
                category.as_deref(),
                &mut std::io::stdout().lock(),
            )?;
        }
        Commands::Recommend { ref key } => {
            let resolved = DiscoveryConfig::resolve(&overrides)?;
            let catalog = load_catalog(&resolved)?;
            catalog_cmds::run_recommend(&catalog, key, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
