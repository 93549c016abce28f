//! Reference data endpoints. Kingdoms and archaeologists are created pending
//! and only change status through the site moderation cascade. Figures have
//! no review state.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};

use super::DataResponse;
use crate::common::{ArchaeologistId, ModeratorCapability};
use crate::domains::archaeologists::{Archaeologist, CreateArchaeologist, UpdateArchaeologist};
use crate::domains::figures::{CreateFigure, Figure, FigureListing};
use crate::domains::kingdoms::{CreateKingdom, Kingdom};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::middleware::AuthUser;

pub async fn list_kingdoms(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Kingdom>>, ApiError> {
    Ok(Json(Kingdom::find_all(&state.db_pool).await?))
}

pub async fn create_kingdom(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CreateKingdom>,
) -> Result<(StatusCode, Json<DataResponse<Kingdom>>), ApiError> {
    user.actor()
        .can(ModeratorCapability::ManageReferenceData)
        .check()?;
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let kingdom = Kingdom::create(input, &state.db_pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Kingdom created", kingdom)),
    ))
}

pub async fn list_archaeologists(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Archaeologist>>, ApiError> {
    Ok(Json(Archaeologist::find_all(&state.db_pool).await?))
}

pub async fn create_archaeologist(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CreateArchaeologist>,
) -> Result<(StatusCode, Json<DataResponse<Archaeologist>>), ApiError> {
    user.actor()
        .can(ModeratorCapability::ManageReferenceData)
        .check()?;
    if input.full_name.trim().is_empty() {
        return Err(ApiError::BadRequest("full_name is required".to_string()));
    }

    let archaeologist = Archaeologist::create(input, &state.db_pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Archaeologist created", archaeologist)),
    ))
}

/// Profile edit; leaves `validation_status` alone
pub async fn update_archaeologist(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateArchaeologist>,
) -> Result<Json<DataResponse<Archaeologist>>, ApiError> {
    user.actor()
        .can(ModeratorCapability::ManageReferenceData)
        .check()?;
    let archaeologist_id = ArchaeologistId::parse(&id)?;
    if input.full_name.trim().is_empty() {
        return Err(ApiError::BadRequest("full_name is required".to_string()));
    }

    let archaeologist = Archaeologist::update(archaeologist_id, input, &state.db_pool)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Archaeologist {} not found", archaeologist_id))
        })?;

    Ok(Json(DataResponse::new("Archaeologist updated", archaeologist)))
}

pub async fn list_figures(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<FigureListing>>, ApiError> {
    Ok(Json(Figure::find_all(&state.db_pool).await?))
}

pub async fn create_figure(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CreateFigure>,
) -> Result<(StatusCode, Json<DataResponse<Figure>>), ApiError> {
    user.actor()
        .can(ModeratorCapability::ManageReferenceData)
        .check()?;
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    if !input.has_consistent_years() {
        return Err(ApiError::BadRequest(
            "death_year precedes birth_year".to_string(),
        ));
    }

    let figure = Figure::create(input, &state.db_pool)
        .await
        .map_err(|e| ApiError::from_store(e, "Referenced kingdom does not exist"))?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Figure created", figure)),
    ))
}
