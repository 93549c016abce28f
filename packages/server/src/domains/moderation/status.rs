use serde::{Deserialize, Serialize};

/// Review state shared by sites, kingdoms and archaeologists.
///
/// Stored as the Postgres enum `moderation_status`, so no other value can
/// reach a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "moderation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Verified => "verified",
            ModerationStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ModerationStatus::Pending)
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending" => Ok(ModerationStatus::Pending),
            "verified" => Ok(ModerationStatus::Verified),
            "rejected" => Ok(ModerationStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid moderation status: {}", s)),
        }
    }
}
