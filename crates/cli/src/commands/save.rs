use anyhow::Result;
use std::path::Path;
use testscope_core::{Error, RunConfiguration, TestProducer};
use tracing::info;

use crate::display::print_configuration;
use crate::utils::load_workspace;

pub fn save_command(manifest_path: Option<&Path>, locations: &[String]) -> Result<()> {
    let loaded = load_workspace(manifest_path)?;
    let selection = loaded.select(locations)?;
    let mut store = loaded.load_store()?;

    let oracle = loaded.snapshot.workspace_oracle();
    let producer = TestProducer::new(loaded.snapshot.index(), &oracle);

    // The name is only known once the selection resolves
    let resolved = producer.resolve(&selection, true).ok_or(Error::NoTestsFound)?;
    let mut config = match store.find(resolved.name()) {
        Some(existing) => existing.clone(),
        None => RunConfiguration::from_descriptor(&resolved.command_descriptor(), resolved.name()),
    };

    let populated = producer.populate(&mut config, &selection);
    if !populated.success {
        return Err(Error::NoTestsFound.into());
    }

    store.upsert(config.clone());
    store.save_to_file(&loaded.store_path)?;
    info!("Saved '{}' to {:?}", config.name, loaded.store_path);

    println!("✅ Saved configuration");
    print_configuration(&config);
    Ok(())
}
