use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::KingdomId;
use crate::domains::moderation::ModerationStatus;

/// Historical polity a site may be attributed to
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Kingdom {
    pub kingdom_id: KingdomId,
    pub name: String,
    pub founded_year: Option<i32>,
    pub dissolved_year: Option<i32>,
    pub capital: Option<String>,
    pub description: Option<String>,
    pub validation_status: ModerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a kingdom
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKingdom {
    pub name: String,
    pub founded_year: Option<i32>,
    pub dissolved_year: Option<i32>,
    pub capital: Option<String>,
    pub description: Option<String>,
}

impl Kingdom {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let kingdoms = sqlx::query_as::<_, Self>("SELECT * FROM kingdoms ORDER BY name ASC")
            .fetch_all(pool)
            .await?;
        Ok(kingdoms)
    }

    /// Create a kingdom. New kingdoms start pending and are promoted by the
    /// first approved site that references them.
    pub async fn create(input: CreateKingdom, pool: &PgPool) -> Result<Self> {
        let kingdom = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO kingdoms (name, founded_year, dissolved_year, capital, description, validation_status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.founded_year)
        .bind(input.dissolved_year)
        .bind(&input.capital)
        .bind(&input.description)
        .fetch_one(pool)
        .await?;
        Ok(kingdom)
    }
}
