//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;

pub use deps::{PgCascadeEngine, ServerDeps};
pub use test_dependencies::{FailPoint, InMemoryModerationStore, ModerationTables};
