//! Site submission and moderation endpoints.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::DataResponse;
use crate::common::{ModeratorCapability, SiteId};
use crate::domains::sites::{CreateSite, Site, SiteListing};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::middleware::AuthUser;

/// Public list of verified sites
pub async fn list_verified_sites(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<SiteListing>>, ApiError> {
    let sites = Site::find_verified(&state.db_pool).await?;
    Ok(Json(sites))
}

/// Contributor submission; always lands as pending
pub async fn submit_site(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CreateSite>,
) -> Result<(StatusCode, Json<DataResponse<Site>>), ApiError> {
    validate_submission(&input)?;

    let site = Site::create(input, user.member_id, &state.db_pool)
        .await
        .map_err(|e| ApiError::from_store(e, "Referenced kingdom does not exist"))?;

    info!(site_id = %site.site_id, reporter = %user.member_id, "Site submitted for review");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Site submitted and awaiting verification", site)),
    ))
}

fn validate_submission(input: &CreateSite) -> Result<(), ApiError> {
    if input.name.trim().is_empty() || input.street.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "name and street are required".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&input.latitude) || !(-180.0..=180.0).contains(&input.longitude) {
        return Err(ApiError::BadRequest(
            "latitude/longitude out of range".to_string(),
        ));
    }
    Ok(())
}

/// Review queue, oldest first
pub async fn list_pending_sites(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SiteListing>>, ApiError> {
    user.actor()
        .can(ModeratorCapability::ViewReviewQueue)
        .check()?;

    let sites = Site::find_pending(&state.db_pool).await?;
    Ok(Json(sites))
}

pub async fn approve_site(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Site>>, ApiError> {
    let actor = user
        .actor()
        .can(ModeratorCapability::ModerateSubmissions)
        .check()?;
    let site_id = SiteId::parse(&id)?;

    let outcome = state.deps.cascade.approve(site_id, &actor).await?;

    Ok(Json(DataResponse::new("Site verified", outcome.site)))
}

pub async fn reject_site(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Site>>, ApiError> {
    let actor = user
        .actor()
        .can(ModeratorCapability::ModerateSubmissions)
        .check()?;
    let site_id = SiteId::parse(&id)?;

    let outcome = state.deps.cascade.reject(site_id, &actor).await?;

    Ok(Json(DataResponse::new("Site rejected", outcome.site)))
}

/// Administrative delete. Does not cascade; refuses while research links or
/// found objects reference the site.
pub async fn delete_site(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Site>>, ApiError> {
    user.actor()
        .can(ModeratorCapability::DeleteRecords)
        .check()?;
    let site_id = SiteId::parse(&id)?;

    let site = Site::delete(site_id, &state.db_pool)
        .await
        .map_err(|e| ApiError::from_store(e, "Site still has linked records"))?
        .ok_or_else(|| ApiError::NotFound(format!("Site {} not found", site_id)))?;

    info!(%site_id, admin = %user.member_id, "Site deleted");

    Ok(Json(DataResponse::new("Site deleted", site)))
}
