//! Test fixtures for creating test data.
//!
//! Rows are created through the model methods; statuses other than pending
//! are forced with a direct UPDATE since nothing else produces them.

use anyhow::Result;
use situs_core::common::{ArchaeologistId, FoundObjectId, KingdomId, MemberId, SiteId};
use situs_core::domains::archaeologists::{Archaeologist, CreateArchaeologist};
use situs_core::domains::kingdoms::{CreateKingdom, Kingdom};
use situs_core::domains::moderation::ModerationStatus;
use situs_core::domains::objects::{CreateFoundObject, FoundObject};
use situs_core::domains::research::{ResearchLink, ResearchLinkKey};
use situs_core::domains::sites::{CreateSite, Site};
use sqlx::PgPool;

pub const REPORTER: MemberId = MemberId::from_i32(100);

pub async fn create_kingdom(
    pool: &PgPool,
    name: &str,
    status: ModerationStatus,
) -> Result<KingdomId> {
    let kingdom = Kingdom::create(
        CreateKingdom {
            name: name.to_string(),
            founded_year: Some(732),
            dissolved_year: Some(1006),
            capital: None,
            description: None,
        },
        pool,
    )
    .await?;

    sqlx::query("UPDATE kingdoms SET validation_status = $2 WHERE kingdom_id = $1")
        .bind(kingdom.kingdom_id)
        .bind(status)
        .execute(pool)
        .await?;

    Ok(kingdom.kingdom_id)
}

pub async fn create_archaeologist(
    pool: &PgPool,
    full_name: &str,
    status: ModerationStatus,
) -> Result<ArchaeologistId> {
    let archaeologist = Archaeologist::create(
        CreateArchaeologist {
            full_name: full_name.to_string(),
            affiliation: Some("Balai Arkeologi".to_string()),
            specialization: None,
            email: None,
            phone_number: None,
        },
        pool,
    )
    .await?;

    sqlx::query(
        "UPDATE archaeologists SET validation_status = $2 WHERE archaeologist_id = $1",
    )
    .bind(archaeologist.archaeologist_id)
    .bind(status)
    .execute(pool)
    .await?;

    Ok(archaeologist.archaeologist_id)
}

pub fn site_input(name: &str, kingdom_id: Option<KingdomId>) -> CreateSite {
    CreateSite {
        name: name.to_string(),
        street: "Jalan Candi".to_string(),
        village_id: None,
        latitude: -7.6079,
        longitude: 110.2038,
        historical_period: Some("8th century".to_string()),
        site_type: Some("temple".to_string()),
        kingdom_id,
    }
}

pub async fn create_site(
    pool: &PgPool,
    name: &str,
    kingdom_id: Option<KingdomId>,
    status: ModerationStatus,
) -> Result<SiteId> {
    let site = Site::create(site_input(name, kingdom_id), REPORTER, pool).await?;

    sqlx::query("UPDATE sites SET verification_status = $2 WHERE site_id = $1")
        .bind(site.site_id)
        .bind(status)
        .execute(pool)
        .await?;

    Ok(site.site_id)
}

pub async fn link(pool: &PgPool, archaeologist_id: ArchaeologistId, site_id: SiteId) -> Result<()> {
    ResearchLink::create(
        ResearchLinkKey {
            archaeologist_id,
            site_id,
        },
        pool,
    )
    .await?;
    Ok(())
}

pub async fn create_object(pool: &PgPool, site_id: SiteId, name: &str) -> Result<FoundObjectId> {
    let object = FoundObject::create(
        CreateFoundObject {
            name: name.to_string(),
            object_type: Some("inscription".to_string()),
            material: Some("stone".to_string()),
            length_cm: None,
            height_cm: None,
            width_cm: None,
            transliteration: None,
            script: Some("Kawi".to_string()),
            language: Some("Old Javanese".to_string()),
            site_id,
        },
        REPORTER,
        pool,
    )
    .await?;
    Ok(object.object_id)
}

pub async fn site_status(pool: &PgPool, id: SiteId) -> Result<ModerationStatus> {
    Ok(
        sqlx::query_scalar("SELECT verification_status FROM sites WHERE site_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?,
    )
}

pub async fn kingdom_status(pool: &PgPool, id: KingdomId) -> Result<ModerationStatus> {
    Ok(
        sqlx::query_scalar("SELECT validation_status FROM kingdoms WHERE kingdom_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?,
    )
}

pub async fn archaeologist_status(pool: &PgPool, id: ArchaeologistId) -> Result<ModerationStatus> {
    Ok(sqlx::query_scalar(
        "SELECT validation_status FROM archaeologists WHERE archaeologist_id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?)
}
