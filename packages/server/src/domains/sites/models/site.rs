use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{KingdomId, MemberId, SiteId};
use crate::domains::moderation::ModerationStatus;

/// Archaeological site submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Site {
    pub site_id: SiteId,

    // Description
    pub name: String,
    pub street: String,
    pub village_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub historical_period: Option<String>,
    pub site_type: Option<String>,

    // References
    pub kingdom_id: Option<KingdomId>,

    // Review workflow
    pub verification_status: ModerationStatus,
    pub reporter_id: MemberId,
    pub reviewed_by: Option<MemberId>,
    pub reviewed_at: Option<DateTime<Utc>>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public listing row for verified sites
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteListing {
    pub site_id: SiteId,
    pub name: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
    pub site_type: Option<String>,
    pub kingdom_name: Option<String>,
    pub verification_status: ModerationStatus,
    pub reporter_id: MemberId,
}

/// Input for a new site submission
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSite {
    pub name: String,
    pub street: String,
    pub village_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub historical_period: Option<String>,
    pub site_type: Option<String>,
    pub kingdom_id: Option<KingdomId>,
}

impl Site {
    /// Find site by ID, returning None if not found
    pub async fn find_by_id(id: SiteId, pool: &PgPool) -> Result<Option<Self>> {
        let site = sqlx::query_as::<_, Self>("SELECT * FROM sites WHERE site_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(site)
    }

    /// Listing rows for a review state, joined with the kingdom name
    pub async fn find_listings_by_status(
        status: ModerationStatus,
        pool: &PgPool,
    ) -> Result<Vec<SiteListing>> {
        let sites = sqlx::query_as::<_, SiteListing>(
            r#"
            SELECT
                s.site_id,
                s.name,
                s.street,
                s.latitude,
                s.longitude,
                s.site_type,
                k.name AS kingdom_name,
                s.verification_status,
                s.reporter_id
            FROM sites s
            LEFT JOIN kingdoms k ON s.kingdom_id = k.kingdom_id
            WHERE s.verification_status = $1
            ORDER BY s.site_id ASC
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;
        Ok(sites)
    }

    /// Publicly visible sites
    pub async fn find_verified(pool: &PgPool) -> Result<Vec<SiteListing>> {
        Self::find_listings_by_status(ModerationStatus::Verified, pool).await
    }

    /// Review queue
    pub async fn find_pending(pool: &PgPool) -> Result<Vec<SiteListing>> {
        Self::find_listings_by_status(ModerationStatus::Pending, pool).await
    }

    /// Create a new submission (always pending)
    pub async fn create(input: CreateSite, reporter_id: MemberId, pool: &PgPool) -> Result<Self> {
        let site = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sites (
                name, street, village_id, latitude, longitude,
                historical_period, site_type, kingdom_id,
                verification_status, reporter_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.street)
        .bind(input.village_id)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.historical_period)
        .bind(&input.site_type)
        .bind(input.kingdom_id)
        .bind(reporter_id)
        .fetch_one(pool)
        .await?;
        Ok(site)
    }

    /// Delete a site. Fails with a foreign-key violation while research links
    /// still point at it; the moderation cascade never calls this.
    pub async fn delete(id: SiteId, pool: &PgPool) -> Result<Option<Self>> {
        let site = sqlx::query_as::<_, Self>("DELETE FROM sites WHERE site_id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(site)
    }
}
