//! Research link endpoints (archaeologist <-> site).

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::DataResponse;
use crate::common::{ModeratorCapability, SiteId};
use crate::domains::archaeologists::Archaeologist;
use crate::domains::research::{ResearchLink, ResearchLinkKey};
use crate::server::app::AppState;
use crate::server::error::{sqlstate, ApiError, FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION};
use crate::server::extract::ApiJson;
use crate::server::middleware::AuthUser;

pub async fn list_archaeologists_for_site(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Archaeologist>>, ApiError> {
    let site_id = SiteId::parse(&id)?;
    let archaeologists = Archaeologist::find_by_site(site_id, &state.db_pool).await?;
    Ok(Json(archaeologists))
}

pub async fn create_research_link(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    ApiJson(key): ApiJson<ResearchLinkKey>,
) -> Result<(StatusCode, Json<DataResponse<ResearchLink>>), ApiError> {
    user.actor()
        .can(ModeratorCapability::ManageReferenceData)
        .check()?;

    let link = match ResearchLink::create(key, &state.db_pool).await {
        Ok(link) => link,
        Err(e) => {
            return Err(match sqlstate(&e).as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    ApiError::Conflict("Research link already exists".to_string())
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    ApiError::NotFound("Archaeologist or site not found".to_string())
                }
                _ => e.into(),
            })
        }
    };

    info!(
        archaeologist_id = %link.archaeologist_id,
        site_id = %link.site_id,
        "Research link created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Research link created", link)),
    ))
}

pub async fn delete_research_link(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    ApiJson(key): ApiJson<ResearchLinkKey>,
) -> Result<Json<DataResponse<ResearchLink>>, ApiError> {
    user.actor()
        .can(ModeratorCapability::ManageReferenceData)
        .check()?;

    let link = ResearchLink::delete(key, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Research link not found".to_string()))?;

    Ok(Json(DataResponse::new("Research link deleted", link)))
}
