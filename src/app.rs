use axum::{
    Router,
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::routes::{
    auction, details, health, owners, players, registration, set_visibility,
};
use crate::services::websocket::websocket_handler;
use crate::state::AppState;

/// Three 5 MB uploads plus the text fields.
const MAX_FORM_BYTES: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let tx = state.tx.clone();

    Router::new()
        .route("/health", get(health))
        .route("/visibility", put(set_visibility))
        .route("/players", get(players::get_players))
        .route("/players/filter", put(players::set_filter))
        .route("/players/by-category", get(players::get_by_category))
        .route("/players/{mobile}", get(players::get_player))
        .route("/auction", get(auction::get_state))
        .route("/auction/open/{index}", post(auction::open_player))
        .route("/auction/close", post(auction::close_player))
        .route("/auction/next", post(auction::next_player))
        .route("/auction/previous", post(auction::previous_player))
        .route("/auction/key", post(auction::press_key))
        .route("/auction/assign/{owner_id}", post(auction::assign_owner))
        .route("/auction/alert/dismiss", post(auction::dismiss_alert))
        .route("/owners", get(owners::get_owners))
        .route("/owners/refresh", post(owners::refresh_owners))
        .route("/owners/{id}", get(owners::get_owner))
        .route("/owners/{id}/squad", get(owners::get_squad))
        .route("/details", get(details::get_details))
        .route("/details/refresh", post(details::refresh_details))
        .route("/assets", get(details::asset_url))
        .route(
            "/register/mobile",
            get(registration::mobile_status).post(registration::mobile_input),
        )
        .route("/register/player", post(registration::register_player))
        .route("/register/owner", post(registration::register_owner))
        .route("/ws", get(websocket_handler))
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .layer(Extension(state))
        .layer(Extension(tx))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
