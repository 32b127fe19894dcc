//! Test command descriptors and their invocable form

pub mod cargo_command;
pub mod descriptor;
pub mod equivalence;

// Re-export commonly used types
pub use cargo_command::CargoCommand;
pub use descriptor::{CommandDescriptor, EXACT_FLAG, TEST_SUBCOMMAND};
pub use equivalence::{AcceptsDescriptor, is_equivalent};
