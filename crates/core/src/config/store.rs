use super::RunConfiguration;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".testscope.json";

/// Run configurations persisted next to the workspace manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    #[serde(default)]
    pub configurations: Vec<RunConfiguration>,
}

impl ConfigStore {
    /// Path of the store for a workspace root
    pub fn path_for(workspace_root: &Path) -> PathBuf {
        workspace_root.join(CONFIG_FILE_NAME)
    }

    /// Load a store; a missing file is an empty store
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config store at {:?}, starting empty", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        debug!("Saved {} configuration(s) to {:?}", self.configurations.len(), path);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&RunConfiguration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Replace the configuration with the same name, or append it
    pub fn upsert(&mut self, config: RunConfiguration) {
        match self.configurations.iter_mut().find(|c| c.name == config.name) {
            Some(existing) => *existing = config,
            None => self.configurations.push(config),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<RunConfiguration> {
        let index = self.configurations.iter().position(|c| c.name == name)?;
        Some(self.configurations.remove(index))
    }
}
