use anyhow::{Result, anyhow};
use std::path::Path;
use testscope_core::TestProducer;

use crate::utils::load_workspace;

/// Exits with status 1 when the stored configuration does not run the selection
pub fn check_command(manifest_path: Option<&Path>, name: &str, locations: &[String]) -> Result<()> {
    let loaded = load_workspace(manifest_path)?;
    let store = loaded.load_store()?;
    let existing = store
        .find(name)
        .ok_or_else(|| anyhow!("No configuration named '{name}'"))?;
    let selection = loaded.select(locations)?;

    let oracle = loaded.snapshot.workspace_oracle();
    let producer = TestProducer::new(loaded.snapshot.index(), &oracle);

    if producer.matches(existing, &selection) {
        println!("✅ '{name}' runs this selection");
        Ok(())
    } else {
        println!("❌ '{name}' does not run this selection");
        std::process::exit(1);
    }
}
