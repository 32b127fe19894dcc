use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{check_command, list_command, resolve_command, run_command, save_command};

#[derive(Parser)]
#[command(bin_name = "cargo")]
#[command(version, propagate_version = true)]
pub struct Cargo {
    #[command(subcommand)]
    pub command: CargoCommand,
}

#[derive(Subcommand, Debug)]
pub enum CargoCommand {
    #[command(name = "testscope")]
    #[command(about = "Resolve a selection into the cargo test run it denotes")]
    Testscope(Runner),
}

#[derive(Parser, Debug)]
#[command(name = "cargo-testscope")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Runner {
    /// Path to the workspace Cargo.toml (defaults to the enclosing workspace)
    #[arg(long, global = true)]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a selection and print the test command
    #[command(visible_alias = "r")]
    Resolve {
        /// Selected locations as path[:line] (e.g., src/net.rs:42)
        #[arg(required = true)]
        locations: Vec<String>,

        /// Only accept locations that are themselves a test function or module
        #[arg(long)]
        no_climb: bool,

        /// Print the descriptor as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Resolve a selection and store it as a run configuration
    #[command(visible_alias = "s")]
    Save {
        /// Selected locations as path[:line]
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// Check whether a stored configuration already runs a selection
    Check {
        /// Name of the stored configuration
        name: String,

        /// Selected locations as path[:line]
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// List stored run configurations
    #[command(visible_alias = "ls")]
    List,
    /// Run a stored configuration
    Run {
        /// Name of the stored configuration
        name: String,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
}

impl Runner {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let manifest = self.manifest_path.as_deref();
        match self.command {
            Commands::Resolve {
                locations,
                no_climb,
                json,
            } => resolve_command(manifest, &locations, no_climb, json),
            Commands::Save { locations } => save_command(manifest, &locations),
            Commands::Check { name, locations } => check_command(manifest, &name, &locations),
            Commands::List => list_command(manifest),
            Commands::Run { name, dry_run } => run_command(manifest, &name, dry_run),
        }
    }
}
