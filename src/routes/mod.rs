pub mod auction;
pub mod details;
pub mod owners;
pub mod players;
pub mod registration;

use axum::{Json, extract::Extension};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisibilityState {
    pub visible: bool,
}

/**
 * PUT whether the operator's screen is visible; polling pauses while hidden.
 */
pub async fn set_visibility(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VisibilityState>,
) -> Json<VisibilityState> {
    info!("Screen visible: {}", payload.visible);
    state.visibility.set(payload.visible);
    Json(VisibilityState {
        visible: state.visibility.is_visible(),
    })
}
