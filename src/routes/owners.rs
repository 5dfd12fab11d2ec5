use axum::{
    Json,
    extract::{Extension, Path},
};
use tracing::info;

use crate::dto::owner_dto::{Owner, OwnerSquad};
use crate::dto::player_dto::PlayerFilter;
use crate::error::{ApiError, AppError};
use crate::services::listing::{owners_by_purse, squad};
use crate::services::provider::ProviderSnapshot;
use crate::state::AppState;

/**
 * GET the cached owner roster, deepest purse first.
 */
pub async fn get_owners(Extension(state): Extension<AppState>) -> Json<ProviderSnapshot<Vec<Owner>>> {
    let mut snapshot = state.owners.snapshot().await;
    snapshot.value = snapshot.value.map(owners_by_purse);
    Json(snapshot)
}

async fn find_owner(state: &AppState, id: &str) -> Result<Owner, AppError> {
    let cached = state
        .owners
        .value()
        .await
        .and_then(|owners| owners.into_iter().find(|o| o.id == id));
    if let Some(owner) = cached {
        return Ok(owner);
    }

    match state.api.owner(id).await {
        Ok(owner) => Ok(owner),
        Err(ApiError::Status { status: 404, .. }) => {
            Err(AppError::NotFound(format!("Owner {id} was not found.")))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_owner(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Owner>, AppError> {
    Ok(Json(find_owner(&state, &id).await?))
}

/**
 * GET an owner with the players they bought.
 */
pub async fn get_squad(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OwnerSquad>, AppError> {
    let owner = find_owner(&state, &id).await?;
    let filter = PlayerFilter {
        owner_id: Some(owner.id.clone()),
        is_sold: Some(true),
        ..Default::default()
    };
    let players = state.api.list_players(&filter).await?;
    info!("Owner {} has {} players", owner.id, players.len());
    Ok(Json(squad(owner, &players)))
}

pub async fn refresh_owners(
    Extension(state): Extension<AppState>,
) -> Json<ProviderSnapshot<Vec<Owner>>> {
    state.owners.refresh().await;
    let mut snapshot = state.owners.snapshot().await;
    snapshot.value = snapshot.value.map(owners_by_purse);
    Json(snapshot)
}
