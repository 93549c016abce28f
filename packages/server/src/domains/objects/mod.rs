//! Found objects domain - inscriptions, statues and tools recovered at a site

pub mod models;

pub use models::{CreateFoundObject, FoundObject};
