use crate::command::{
    AcceptsDescriptor, CargoCommand, CommandDescriptor, TEST_SUBCOMMAND, cargo_command::build_args,
};
use crate::types::TargetSpec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// A named, stored test run.
///
/// `name`, `command`, `targets`, `path_filter` and `flags` identify the run
/// and are derived from a selection. The remaining fields belong to the user
/// and survive re-population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfiguration {
    pub name: String,
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(default)]
    pub path_filter: String,
    #[serde(default)]
    pub flags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_test_binary_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

fn default_command() -> String {
    TEST_SUBCOMMAND.to_string()
}

impl RunConfiguration {
    /// Fresh configuration carrying only the identity of `descriptor`
    pub fn from_descriptor(descriptor: &CommandDescriptor, name: &str) -> Self {
        Self {
            name: name.to_string(),
            command: descriptor.subcommand.clone(),
            targets: descriptor.targets.iter().map(|t| t.spec()).collect(),
            path_filter: descriptor.path_filter.clone(),
            flags: descriptor.flags.iter().cloned().collect(),
            extra_args: Vec::new(),
            extra_test_binary_args: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    /// Render as a cargo command including the user's extras
    pub fn to_command(&self) -> CargoCommand {
        let args = build_args(
            &self.command,
            &self.targets,
            &self.path_filter,
            &self.flags,
            &self.extra_args,
            &self.extra_test_binary_args,
        );
        let mut command = CargoCommand::new(args);
        if let Some(dir) = &self.working_dir {
            command = command.with_working_dir(dir.clone());
        }
        for (key, value) in &self.env {
            command = command.with_env(key.clone(), value.clone());
        }
        command
    }
}

impl AcceptsDescriptor for RunConfiguration {
    fn is_from(&self, descriptor: &CommandDescriptor) -> bool {
        let targets: BTreeSet<TargetSpec> = self.targets.iter().cloned().collect();
        let flags: BTreeSet<String> = self.flags.iter().cloned().collect();

        self.command == descriptor.subcommand
            && targets == descriptor.target_specs()
            && self.path_filter == descriptor.path_filter
            && flags == descriptor.flags
    }
}

/// Replace the identity of `existing` with the one derived from
/// `descriptor`, keeping working directory, environment and extra arguments.
pub fn merge_with_default(
    existing: &RunConfiguration,
    descriptor: &CommandDescriptor,
    name: &str,
) -> RunConfiguration {
    RunConfiguration {
        extra_args: existing.extra_args.clone(),
        extra_test_binary_args: existing.extra_test_binary_args.clone(),
        working_dir: existing.working_dir.clone(),
        env: existing.env.clone(),
        ..RunConfiguration::from_descriptor(descriptor, name)
    }
}
