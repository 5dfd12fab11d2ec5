use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::dto::auction_dto::{AuctionView, KeyPress};
use crate::error::AppError;
use crate::state::AppState;

/**
 * GET the auction screen state.
 */
pub async fn get_state(Extension(state): Extension<AppState>) -> Json<AuctionView> {
    Json(state.desk.view().await)
}

/**
 * POST to open the detail modal on a player of the current list.
 */
pub async fn open_player(
    Extension(state): Extension<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<AuctionView>, AppError> {
    info!("Opening player at {}", index);
    state.desk.open(index).await?;
    Ok(Json(state.desk.view().await))
}

pub async fn close_player(Extension(state): Extension<AppState>) -> Json<AuctionView> {
    state.desk.close().await;
    Json(state.desk.view().await)
}

pub async fn next_player(Extension(state): Extension<AppState>) -> Json<AuctionView> {
    state.desk.next().await;
    Json(state.desk.view().await)
}

pub async fn previous_player(Extension(state): Extension<AppState>) -> Json<AuctionView> {
    state.desk.previous().await;
    Json(state.desk.view().await)
}

/**
 * POST a keyboard shortcut (`ArrowUp`, `ArrowDown`, `ArrowLeft`, `ArrowRight`, `Escape`).
 */
pub async fn press_key(
    Extension(state): Extension<AppState>,
    Json(payload): Json<KeyPress>,
) -> Json<AuctionView> {
    state.desk.key(payload.key).await;
    Json(state.desk.view().await)
}

/**
 * POST to sell the open player to an owner at the current bid.
 */
pub async fn assign_owner(
    Extension(state): Extension<AppState>,
    Path(owner_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    info!("Owner {} selected", owner_id);
    state.desk.assign_owner(&owner_id).await?;
    Ok((StatusCode::OK, Json(state.desk.view().await)))
}

pub async fn dismiss_alert(Extension(state): Extension<AppState>) -> Json<AuctionView> {
    state.desk.dismiss_alert().await;
    Json(state.desk.view().await)
}
