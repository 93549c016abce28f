//! Research domain - archaeologist/site association rows

pub mod models;

pub use models::{ResearchLink, ResearchLinkKey};
