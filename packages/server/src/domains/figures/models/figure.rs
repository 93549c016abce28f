use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{FigureId, KingdomId};

/// Historical figure. Reference data without a review workflow.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Figure {
    pub figure_id: FigureId,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub biography: Option<String>,
    pub kingdom_id: Option<KingdomId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Figure joined with its kingdom's name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FigureListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub figure: Figure,
    pub kingdom_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFigure {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub biography: Option<String>,
    pub kingdom_id: Option<KingdomId>,
}

impl CreateFigure {
    pub fn has_consistent_years(&self) -> bool {
        match (self.birth_year, self.death_year) {
            (Some(born), Some(died)) => born <= died,
            _ => true,
        }
    }
}

impl Figure {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<FigureListing>> {
        let figures = sqlx::query_as::<_, FigureListing>(
            r#"
            SELECT f.*, k.name AS kingdom_name
            FROM figures f
            LEFT JOIN kingdoms k ON f.kingdom_id = k.kingdom_id
            ORDER BY f.name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(figures)
    }

    /// Fails with a foreign-key violation when the kingdom does not exist
    pub async fn create(input: CreateFigure, pool: &PgPool) -> Result<Self> {
        let figure = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO figures (name, birth_year, death_year, biography, kingdom_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.birth_year)
        .bind(input.death_year)
        .bind(&input.biography)
        .bind(input.kingdom_id)
        .fetch_one(pool)
        .await?;
        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(birth_year: Option<i32>, death_year: Option<i32>) -> CreateFigure {
        CreateFigure {
            name: "Airlangga".to_string(),
            birth_year,
            death_year,
            biography: None,
            kingdom_id: None,
        }
    }

    #[test]
    fn test_years_may_be_partial() {
        assert!(input(Some(1000), None).has_consistent_years());
        assert!(input(None, None).has_consistent_years());
    }

    #[test]
    fn test_death_before_birth_is_inconsistent() {
        assert!(input(Some(1000), Some(1049)).has_consistent_years());
        assert!(!input(Some(1049), Some(1000)).has_consistent_years());
    }
}
