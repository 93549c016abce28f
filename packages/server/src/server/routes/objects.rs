//! Found object endpoints. Objects are reviewed one row at a time; approving
//! or rejecting one never touches its site.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::DataResponse;
use crate::common::{FoundObjectId, ModeratorCapability, SiteId};
use crate::domains::moderation::ModerationStatus;
use crate::domains::objects::{CreateFoundObject, FoundObject};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::middleware::AuthUser;

/// Public list of verified objects at a site
pub async fn list_verified_objects_for_site(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FoundObject>>, ApiError> {
    let site_id = SiteId::parse(&id)?;
    let objects = FoundObject::find_verified_by_site(site_id, &state.db_pool).await?;
    Ok(Json(objects))
}

pub async fn submit_object(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CreateFoundObject>,
) -> Result<(StatusCode, Json<DataResponse<FoundObject>>), ApiError> {
    validate_object(&input)?;

    let object = FoundObject::create(input, user.member_id, &state.db_pool)
        .await
        .map_err(|e| ApiError::from_store(e, "Referenced site does not exist"))?;

    info!(object_id = %object.object_id, site_id = %object.site_id, reporter = %user.member_id, "Object submitted for review");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Object submitted and awaiting verification", object)),
    ))
}

fn validate_object(input: &CreateFoundObject) -> Result<(), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    let invalid = input.invalid_dimensions();
    if !invalid.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "{} must be positive",
            invalid.join(", ")
        )));
    }
    Ok(())
}

pub async fn list_pending_objects(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<FoundObject>>, ApiError> {
    user.actor()
        .can(ModeratorCapability::ViewReviewQueue)
        .check()?;

    Ok(Json(FoundObject::find_pending(&state.db_pool).await?))
}

pub async fn approve_object(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<FoundObject>>, ApiError> {
    review_object(state, user, &id, ModerationStatus::Verified, "Object verified").await
}

pub async fn reject_object(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<FoundObject>>, ApiError> {
    review_object(state, user, &id, ModerationStatus::Rejected, "Object rejected").await
}

async fn review_object(
    state: AppState,
    user: AuthUser,
    raw_id: &str,
    status: ModerationStatus,
    message: &str,
) -> Result<Json<DataResponse<FoundObject>>, ApiError> {
    user.actor()
        .can(ModeratorCapability::ModerateSubmissions)
        .check()?;
    let object_id = FoundObjectId::parse(raw_id)?;

    let object = FoundObject::set_status(object_id, status, user.member_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Object {} not found", object_id)))?;

    info!(%object_id, ?status, moderator = %user.member_id, "Object reviewed");

    Ok(Json(DataResponse::new(message, object)))
}

pub async fn delete_object(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<FoundObject>>, ApiError> {
    user.actor()
        .can(ModeratorCapability::DeleteRecords)
        .check()?;
    let object_id = FoundObjectId::parse(&id)?;

    let object = FoundObject::delete(object_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Object {} not found", object_id)))?;

    info!(%object_id, admin = %user.member_id, "Object deleted");

    Ok(Json(DataResponse::new("Object deleted", object)))
}
