pub mod item;
pub mod position;
pub mod target;

// Re-export commonly used types
pub use item::ItemKind;
pub use position::{Position, Span};
pub use target::{BuildTarget, Package, PackageId, TargetKind, TargetSpec};
