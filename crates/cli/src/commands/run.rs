use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::utils::load_workspace;

pub fn run_command(manifest_path: Option<&Path>, name: &str, dry_run: bool) -> Result<()> {
    let loaded = load_workspace(manifest_path)?;
    let store = loaded.load_store()?;
    let config = store
        .find(name)
        .ok_or_else(|| anyhow!("No configuration named '{name}'"))?;

    let mut command = config.to_command();
    if command.working_dir.is_none() {
        command = command.with_working_dir(loaded.snapshot.workspace().root().to_path_buf());
    }
    debug!("Command for '{}': {:?}", name, command);

    let shell_cmd = command.to_shell_command();
    if dry_run {
        println!("{shell_cmd}");
        if let Some(ref dir) = command.working_dir {
            println!("Working directory: {}", dir.display());
        }
        if !command.env.is_empty() {
            println!("Environment variables:");
            for (key, value) in &command.env {
                println!("  {key}={value}");
            }
        }
        return Ok(());
    }

    info!("Running: {}", shell_cmd);
    let mut process = Command::new("cargo");
    process.args(&command.args);
    if let Some(ref dir) = command.working_dir {
        info!("Working directory: {}", dir.display());
        process.current_dir(dir);
    }
    for (key, value) in &command.env {
        process.env(key, value);
    }

    let status = process
        .status()
        .with_context(|| format!("Failed to execute: {shell_cmd}"))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
