use super::{AuthError, ModeratorCapability, Role};
use crate::common::entity_ids::MemberId;
use tracing::debug;

/// Entry point for authorization checks
///
/// Usage:
/// ```
/// use situs_core::common::{Actor, MemberId, ModeratorCapability, Role};
///
/// let allowed = Actor::new(MemberId::from_i32(4), Role::Administrator)
///     .can(ModeratorCapability::DeleteRecords)
///     .check();
/// assert!(allowed.is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    member_id: MemberId,
    role: Role,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `member_id` - The member performing the operation
    /// * `role` - Role from the verified session token
    pub fn new(member_id: MemberId, role: Role) -> Self {
        Self { member_id, role }
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: ModeratorCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: ModeratorCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check, returning the actor on success so
    /// callers can thread it into the operation.
    pub fn check(self) -> Result<Actor, AuthError> {
        if self.capability.granted_to(self.actor.role) {
            return Ok(self.actor);
        }

        debug!(
            member_id = %self.actor.member_id,
            role = %self.actor.role,
            capability = ?self.capability,
            "Capability check failed"
        );

        Err(AuthError::PermissionDenied(format!(
            "role {} cannot perform {:?}",
            self.actor.role, self.capability
        )))
    }
}
