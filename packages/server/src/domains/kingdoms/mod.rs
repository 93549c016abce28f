//! Kingdoms domain - polities sites are attributed to

pub mod models;

pub use models::{CreateKingdom, Kingdom};
