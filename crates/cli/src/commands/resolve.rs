use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use testscope_core::{CargoCommand, CommandDescriptor, Error, TestProducer};
use tracing::debug;

use crate::display::print_descriptor;
use crate::utils::load_workspace;

#[derive(Serialize)]
struct ResolvedOutput<'a> {
    name: &'a str,
    anchor: String,
    command: String,
    descriptor: &'a CommandDescriptor,
}

pub fn resolve_command(
    manifest_path: Option<&Path>,
    locations: &[String],
    no_climb: bool,
    json: bool,
) -> Result<()> {
    let loaded = load_workspace(manifest_path)?;
    let selection = loaded.select(locations)?;
    debug!("Resolving {} selected element(s)", selection.len());

    let oracle = loaded.snapshot.workspace_oracle();
    let producer = TestProducer::new(loaded.snapshot.index(), &oracle);
    let config = producer
        .resolve(&selection, !no_climb)
        .ok_or(Error::NoTestsFound)?;

    let descriptor = config.command_descriptor();
    let command = CargoCommand::from_descriptor(&descriptor).to_shell_command();

    if json {
        let output = ResolvedOutput {
            name: config.name(),
            anchor: loaded.display_path(config.anchor()),
            command,
            descriptor: &descriptor,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("🧪 {}", config.name());
        println!("   📍 {}", loaded.display_path(config.anchor()));
        println!("   🚀 {command}");
        print_descriptor(&descriptor);
    }

    Ok(())
}
