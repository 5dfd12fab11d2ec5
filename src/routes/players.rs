use axum::{
    Json,
    extract::{Extension, Path, Query},
};
use serde::Deserialize;
use tracing::info;

use crate::dto::auction_dto::{AuctionView, CategoryGroup};
use crate::dto::player_dto::{Player, PlayerFilter};
use crate::error::{ApiError, AppError};
use crate::services::listing::search_players;
use crate::services::player_formatter::sort_for_listing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub sorted: bool,
}

/**
 * GET the loaded players, optionally narrowed and sorted locally.
 */
pub async fn get_players(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Player>> {
    let view = state.desk.view().await;
    let mut players: Vec<Player> = match query.q.as_deref() {
        Some(q) => search_players(&view.players, q).into_iter().cloned().collect(),
        None => view.players,
    };
    if query.sorted {
        sort_for_listing(&mut players);
    }
    Json(players)
}

/**
 * PUT a new server-side filter. Search edits are debounced.
 */
pub async fn set_filter(
    Extension(state): Extension<AppState>,
    Json(filter): Json<PlayerFilter>,
) -> Result<Json<AuctionView>, AppError> {
    info!("Player filter changed: {:?}", filter);
    state.desk.set_filter(filter).await?;
    Ok(Json(state.desk.view().await))
}

pub async fn get_by_category(Extension(state): Extension<AppState>) -> Json<Vec<CategoryGroup>> {
    Json(state.desk.category_groups().await)
}

/**
 * GET one player's details straight from the backend.
 */
pub async fn get_player(
    Extension(state): Extension<AppState>,
    Path(mobile_number): Path<String>,
) -> Result<Json<Player>, AppError> {
    match state.api.player_details(&mobile_number).await {
        Ok(player) => Ok(Json(player)),
        Err(ApiError::Status { status: 404, .. }) => Err(AppError::NotFound(format!(
            "No player registered with {mobile_number}"
        ))),
        Err(e) => Err(e.into()),
    }
}
