//! Sites domain - archaeological site submissions

pub mod models;

pub use models::{CreateSite, Site, SiteListing};
