pub mod parser;
pub mod workspace;

pub use parser::parse_location;
pub use workspace::{LoadedWorkspace, load_workspace};
