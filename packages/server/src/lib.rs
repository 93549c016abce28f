// Situs - archaeological site registry API core
//
// Contributors submit sites; verifiers approve or reject them, and the
// decision cascades to the kingdom and archaeologists each site references.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
