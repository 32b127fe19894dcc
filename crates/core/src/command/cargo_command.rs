use super::CommandDescriptor;
use crate::types::TargetSpec;
use std::path::PathBuf;

/// An invocable `cargo` command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoCommand {
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CargoCommand {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// `cargo test --package <pkg> <targets> [-- <filter> [--exact]]`
    pub fn from_descriptor(descriptor: &CommandDescriptor) -> Self {
        let targets: Vec<TargetSpec> = descriptor.targets.iter().map(|t| t.spec()).collect();
        let flags: Vec<String> = descriptor.flags.iter().cloned().collect();
        Self::new(build_args(
            &descriptor.subcommand,
            &targets,
            &descriptor.path_filter,
            &flags,
            &[],
            &[],
        ))
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.env.push((key, value));
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = String::from("cargo");
        for arg in &self.args {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }
}

/// Assemble cargo arguments.
///
/// `extra_args` go to cargo, `test_binary_args` to the test harness after
/// the filter and flags.
pub(crate) fn build_args(
    subcommand: &str,
    targets: &[TargetSpec],
    path_filter: &str,
    flags: &[String],
    extra_args: &[String],
    test_binary_args: &[String],
) -> Vec<String> {
    let mut args = vec![subcommand.to_string()];

    // Add packages in first-seen order
    let mut packages: Vec<&str> = Vec::new();
    for target in targets {
        if !packages.contains(&target.package.as_str()) {
            packages.push(&target.package);
        }
    }
    for package in packages {
        args.push("--package".to_string());
        args.push(package.to_string());
    }

    for target in targets {
        args.extend(target.cargo_args());
    }

    args.extend(extra_args.iter().cloned());

    let mut harness = Vec::new();
    if !path_filter.is_empty() {
        harness.push(path_filter.to_string());
    }
    harness.extend(flags.iter().cloned());
    harness.extend(test_binary_args.iter().cloned());
    if !harness.is_empty() {
        args.push("--".to_string());
        args.extend(harness);
    }

    args
}
