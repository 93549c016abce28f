//! Archaeologists domain - researchers linked to sites

pub mod models;

pub use models::{Archaeologist, CreateArchaeologist, UpdateArchaeologist};
