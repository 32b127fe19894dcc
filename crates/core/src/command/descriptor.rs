use crate::types::{BuildTarget, TargetSpec};
use serde::Serialize;
use std::collections::BTreeSet;

pub const TEST_SUBCOMMAND: &str = "test";
pub const EXACT_FLAG: &str = "--exact";

/// Identity of a test invocation: which targets, which subcommand, which
/// tests and how the filter is matched.
///
/// An empty `path_filter` means no filter: every test of every target runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub targets: Vec<BuildTarget>,
    pub subcommand: String,
    pub path_filter: String,
    pub flags: BTreeSet<String>,
}

impl CommandDescriptor {
    pub fn for_test(targets: Vec<BuildTarget>, path_filter: &str, exact: bool) -> Self {
        let mut flags = BTreeSet::new();
        if exact {
            flags.insert(EXACT_FLAG.to_string());
        }
        Self {
            targets,
            subcommand: TEST_SUBCOMMAND.to_string(),
            path_filter: path_filter.to_string(),
            flags,
        }
    }

    pub fn has_filter(&self) -> bool {
        !self.path_filter.is_empty()
    }

    pub fn is_exact(&self) -> bool {
        self.flags.contains(EXACT_FLAG)
    }

    /// Targets as stored references, ignoring order and duplicates
    pub fn target_specs(&self) -> BTreeSet<TargetSpec> {
        self.targets.iter().map(BuildTarget::spec).collect()
    }
}
