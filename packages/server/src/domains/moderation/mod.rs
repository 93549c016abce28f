//! Moderation domain - the verification cascade.
//!
//! Approving or rejecting a site propagates the decision to the kingdom it is
//! attributed to and to the archaeologists linked to it, atomically.

pub mod engine;
pub mod error;
pub mod postgres;
pub mod status;
pub mod store;

pub use engine::{CascadeEngine, CascadeOutcome, Decision};
pub use error::ModerationError;
pub use postgres::{PgModerationStore, PgModerationTx};
pub use status::ModerationStatus;
pub use store::{ModerationStore, ModerationTx};
