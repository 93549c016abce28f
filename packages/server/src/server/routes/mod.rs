// HTTP routes
pub mod health;
pub mod objects;
pub mod reference;
pub mod research;
pub mod sites;

pub use health::*;
pub use objects::*;
pub use reference::*;
pub use research::*;
pub use sites::*;

use serde::Serialize;

/// `{ "message": ..., "data": ... }` envelope for mutations
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            data,
        }
    }
}
