use anyhow::Result;
use std::path::Path;

use crate::display::print_configuration;
use crate::utils::load_workspace;

pub fn list_command(manifest_path: Option<&Path>) -> Result<()> {
    let loaded = load_workspace(manifest_path)?;
    let store = loaded.load_store()?;

    if store.configurations.is_empty() {
        println!("No saved configurations in {}", loaded.store_path.display());
        return Ok(());
    }

    for config in &store.configurations {
        print_configuration(config);
    }
    Ok(())
}
