pub mod formatter;

pub use formatter::{print_configuration, print_descriptor};
