use serde::{Deserialize, Serialize};

/// Member roles carried in the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits sites and research records; everything lands as pending
    Contributor,

    /// Reviews submissions
    Verifier,

    /// Reviews submissions and performs destructive administration
    Administrator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Contributor => write!(f, "contributor"),
            Role::Verifier => write!(f, "verifier"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contributor" => Ok(Role::Contributor),
            "verifier" => Ok(Role::Verifier),
            "administrator" => Ok(Role::Administrator),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Capabilities gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeratorCapability {
    /// Approve or reject site submissions (runs the verification cascade)
    ModerateSubmissions,

    /// Read the pending review queue
    ViewReviewQueue,

    /// Create kingdoms, archaeologists and research links
    ManageReferenceData,

    /// Delete submissions outright
    DeleteRecords,
}

impl ModeratorCapability {
    /// Whether `role` holds this capability
    pub fn granted_to(&self, role: Role) -> bool {
        match self {
            ModeratorCapability::ModerateSubmissions
            | ModeratorCapability::ViewReviewQueue
            | ModeratorCapability::ManageReferenceData => {
                matches!(role, Role::Verifier | Role::Administrator)
            }
            ModeratorCapability::DeleteRecords => role == Role::Administrator,
        }
    }
}
