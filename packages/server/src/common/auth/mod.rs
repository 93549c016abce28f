/// Authorization module for site moderation
///
/// Provides a fluent API for capability checks before a handler touches the
/// moderation core:
///
/// ```rust
/// use situs_core::common::{Actor, MemberId, ModeratorCapability, Role};
///
/// Actor::new(MemberId::from_i32(1), Role::Verifier)
///     .can(ModeratorCapability::ModerateSubmissions)
///     .check()
///     .unwrap();
/// ```
mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::{ModeratorCapability, Role};
pub use errors::AuthError;
