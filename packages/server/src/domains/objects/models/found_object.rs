use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{FoundObjectId, MemberId, SiteId};
use crate::domains::moderation::ModerationStatus;

/// Object recovered at a site. Reviewed on its own; site moderation never
/// touches it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FoundObject {
    pub object_id: FoundObjectId,

    // Description
    pub name: String,
    pub object_type: Option<String>,
    pub material: Option<String>,
    pub length_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub width_cm: Option<f64>,

    // Inscription
    pub transliteration: Option<String>,
    pub script: Option<String>,
    pub language: Option<String>,

    pub site_id: SiteId,

    // Review workflow
    pub verification_status: ModerationStatus,
    pub reporter_id: MemberId,
    pub reviewed_by: Option<MemberId>,
    pub reviewed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new object report
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFoundObject {
    pub name: String,
    pub object_type: Option<String>,
    pub material: Option<String>,
    pub length_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub transliteration: Option<String>,
    pub script: Option<String>,
    pub language: Option<String>,
    pub site_id: SiteId,
}

impl CreateFoundObject {
    /// Dimensions that were given but are not positive finite numbers
    pub fn invalid_dimensions(&self) -> Vec<&'static str> {
        [
            ("length_cm", self.length_cm),
            ("height_cm", self.height_cm),
            ("width_cm", self.width_cm),
        ]
        .into_iter()
        .filter_map(|(field, value)| match value {
            Some(v) if !(v.is_finite() && v > 0.0) => Some(field),
            _ => None,
        })
        .collect()
    }
}

impl FoundObject {
    /// Verified objects for a site, whatever the site's own status
    pub async fn find_verified_by_site(site_id: SiteId, pool: &PgPool) -> Result<Vec<Self>> {
        let objects = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM found_objects
            WHERE site_id = $1 AND verification_status = 'verified'
            ORDER BY object_id ASC
            "#,
        )
        .bind(site_id)
        .fetch_all(pool)
        .await?;
        Ok(objects)
    }

    /// Review queue, oldest first
    pub async fn find_pending(pool: &PgPool) -> Result<Vec<Self>> {
        let objects = sqlx::query_as::<_, Self>(
            "SELECT * FROM found_objects WHERE verification_status = 'pending' ORDER BY object_id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(objects)
    }

    /// Record a new report (always pending). Fails with a foreign-key
    /// violation when the site does not exist.
    pub async fn create(
        input: CreateFoundObject,
        reporter_id: MemberId,
        pool: &PgPool,
    ) -> Result<Self> {
        let object = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO found_objects (
                name, object_type, material, length_cm, height_cm, width_cm,
                transliteration, script, language, site_id,
                verification_status, reporter_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending', $11)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.object_type)
        .bind(&input.material)
        .bind(input.length_cm)
        .bind(input.height_cm)
        .bind(input.width_cm)
        .bind(&input.transliteration)
        .bind(&input.script)
        .bind(&input.language)
        .bind(input.site_id)
        .bind(reporter_id)
        .fetch_one(pool)
        .await?;
        Ok(object)
    }

    /// Set the review state and stamp the reviewer. Single-row update.
    pub async fn set_status(
        id: FoundObjectId,
        status: ModerationStatus,
        reviewed_by: MemberId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let object = sqlx::query_as::<_, Self>(
            r#"
            UPDATE found_objects
            SET verification_status = $2,
                reviewed_by = $3,
                reviewed_at = NOW(),
                updated_at = NOW()
            WHERE object_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(reviewed_by)
        .fetch_optional(pool)
        .await?;
        Ok(object)
    }

    pub async fn delete(id: FoundObjectId, pool: &PgPool) -> Result<Option<Self>> {
        let object =
            sqlx::query_as::<_, Self>("DELETE FROM found_objects WHERE object_id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(length_cm: Option<f64>, height_cm: Option<f64>) -> CreateFoundObject {
        CreateFoundObject {
            name: "Prasasti Canggal".to_string(),
            object_type: Some("inscription".to_string()),
            material: Some("andesite".to_string()),
            length_cm,
            height_cm,
            width_cm: None,
            transliteration: None,
            script: Some("Pallava".to_string()),
            language: Some("Sanskrit".to_string()),
            site_id: SiteId::new(1).unwrap(),
        }
    }

    #[test]
    fn test_absent_dimensions_are_valid() {
        assert!(input(None, None).invalid_dimensions().is_empty());
    }

    #[test]
    fn test_non_positive_dimensions_are_reported() {
        assert_eq!(
            input(Some(0.0), Some(-3.5)).invalid_dimensions(),
            vec!["length_cm", "height_cm"]
        );
        assert_eq!(input(Some(f64::NAN), Some(120.0)).invalid_dimensions(), vec!["length_cm"]);
    }
}
