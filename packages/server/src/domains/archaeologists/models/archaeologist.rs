use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ArchaeologistId, SiteId};
use crate::domains::moderation::ModerationStatus;

/// Researcher linked to sites through research links
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Archaeologist {
    pub archaeologist_id: ArchaeologistId,
    pub full_name: String,
    pub affiliation: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub validation_status: ModerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an archaeologist
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArchaeologist {
    pub full_name: String,
    pub affiliation: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Full replacement of an archaeologist's profile. Review state is untouched.
pub type UpdateArchaeologist = CreateArchaeologist;

impl Archaeologist {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let archaeologists =
            sqlx::query_as::<_, Self>("SELECT * FROM archaeologists ORDER BY full_name ASC")
                .fetch_all(pool)
                .await?;
        Ok(archaeologists)
    }

    /// Archaeologists researching a site
    pub async fn find_by_site(site_id: SiteId, pool: &PgPool) -> Result<Vec<Self>> {
        let archaeologists = sqlx::query_as::<_, Self>(
            r#"
            SELECT a.*
            FROM archaeologists a
            JOIN research_links rl ON a.archaeologist_id = rl.archaeologist_id
            WHERE rl.site_id = $1
            ORDER BY a.archaeologist_id ASC
            "#,
        )
        .bind(site_id)
        .fetch_all(pool)
        .await?;
        Ok(archaeologists)
    }

    pub async fn create(input: CreateArchaeologist, pool: &PgPool) -> Result<Self> {
        let archaeologist = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO archaeologists (full_name, affiliation, specialization, email, phone_number, validation_status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING *
            "#,
        )
        .bind(&input.full_name)
        .bind(&input.affiliation)
        .bind(&input.specialization)
        .bind(&input.email)
        .bind(&input.phone_number)
        .fetch_one(pool)
        .await?;
        Ok(archaeologist)
    }

    pub async fn update(
        id: ArchaeologistId,
        input: UpdateArchaeologist,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let archaeologist = sqlx::query_as::<_, Self>(
            r#"
            UPDATE archaeologists
            SET full_name = $2,
                affiliation = $3,
                specialization = $4,
                email = $5,
                phone_number = $6,
                updated_at = NOW()
            WHERE archaeologist_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.full_name)
        .bind(&input.affiliation)
        .bind(&input.specialization)
        .bind(&input.email)
        .bind(&input.phone_number)
        .fetch_optional(pool)
        .await?;
        Ok(archaeologist)
    }
}
