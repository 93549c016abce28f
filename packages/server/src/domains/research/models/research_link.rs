use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ArchaeologistId, SiteId};

/// Which archaeologist studies which site. Unique per pair, no status.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResearchLink {
    pub archaeologist_id: ArchaeologistId,
    pub site_id: SiteId,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or removing a link
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResearchLinkKey {
    pub archaeologist_id: ArchaeologistId,
    pub site_id: SiteId,
}

impl ResearchLink {
    /// Create a link. A duplicate pair fails with a unique violation.
    pub async fn create(key: ResearchLinkKey, pool: &PgPool) -> Result<Self> {
        let link = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO research_links (archaeologist_id, site_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(key.archaeologist_id)
        .bind(key.site_id)
        .fetch_one(pool)
        .await?;
        Ok(link)
    }

    pub async fn delete(key: ResearchLinkKey, pool: &PgPool) -> Result<Option<Self>> {
        let link = sqlx::query_as::<_, Self>(
            r#"
            DELETE FROM research_links
            WHERE archaeologist_id = $1 AND site_id = $2
            RETURNING *
            "#,
        )
        .bind(key.archaeologist_id)
        .bind(key.site_id)
        .fetch_optional(pool)
        .await?;
        Ok(link)
    }
}
