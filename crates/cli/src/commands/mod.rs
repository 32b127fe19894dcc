pub mod check;
pub mod list;
pub mod resolve;
pub mod run;
pub mod save;

pub use check::check_command;
pub use list::list_command;
pub use resolve::resolve_command;
pub use run::run_command;
pub use save::save_command;
