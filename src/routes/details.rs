use axum::{
    Json,
    extract::{Extension, Query},
};
use serde::{Deserialize, Serialize};

use crate::dto::details_dto::FrontendDetails;
use crate::error::AppError;
use crate::services::provider::ProviderSnapshot;
use crate::state::AppState;

pub async fn get_details(
    Extension(state): Extension<AppState>,
) -> Json<ProviderSnapshot<FrontendDetails>> {
    Json(state.details.snapshot().await)
}

pub async fn refresh_details(
    Extension(state): Extension<AppState>,
) -> Json<ProviderSnapshot<FrontendDetails>> {
    state.details.refresh().await;
    Json(state.details.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct AssetUrl {
    pub url: String,
}

/**
 * GET the public URL of a static asset under the configured base path.
 */
pub async fn asset_url(
    Extension(state): Extension<AppState>,
    Query(query): Query<AssetQuery>,
) -> Result<Json<AssetUrl>, AppError> {
    if query.path.trim().is_empty() {
        return Err(AppError::BadRequest("path is required".into()));
    }
    Ok(Json(AssetUrl {
        url: state.settings.asset_url(query.path.trim()),
    }))
}
