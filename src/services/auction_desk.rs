use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{RwLock, broadcast};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::dto::auction_dto::{AuctionView, CategoryGroup, Key};
use crate::dto::player_dto::{PlayerAssignment, PlayerFilter};
use crate::error::{ApiError, AppError, AuctionError};
use crate::services::auction::{AuctionBoard, PendingSale};
use crate::services::debounce::Debouncer;
use crate::services::gateway::TournamentApi;
use crate::services::provider::OwnersProvider;
use crate::services::websocket::send_auction_update;

/// Drives the auction board against the backend: list fetches, owner
/// assignment and the post-sale overlay.
pub struct AuctionDesk {
    api: Arc<dyn TournamentApi>,
    owners: Arc<OwnersProvider>,
    board: RwLock<AuctionBoard>,
    filter: RwLock<PlayerFilter>,
    /// Sequence number of the latest list fetch; older responses are dropped.
    fetches: AtomicU64,
    search: Debouncer,
    celebration: Duration,
    tx: broadcast::Sender<String>,
}

impl AuctionDesk {
    pub fn new(
        api: Arc<dyn TournamentApi>,
        owners: Arc<OwnersProvider>,
        settings: &Settings,
        tx: broadcast::Sender<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            owners,
            board: RwLock::new(AuctionBoard::new(settings.bid_step)),
            filter: RwLock::new(PlayerFilter::default()),
            fetches: AtomicU64::new(0),
            search: Debouncer::new(settings.debounce),
            celebration: settings.celebration,
            tx,
        })
    }

    pub async fn view(&self) -> AuctionView {
        let filter = self.filter.read().await.clone();
        self.board.read().await.view(&filter)
    }

    pub async fn category_groups(&self) -> Vec<CategoryGroup> {
        self.board.read().await.category_groups()
    }

    pub async fn filter(&self) -> PlayerFilter {
        self.filter.read().await.clone()
    }

    async fn publish(&self) {
        let view = self.view().await;
        send_auction_update(&self.tx, &view);
    }

    /// Fetch the list for the current filter and replace the board's players.
    /// A failure is kept as the page error and also returned.
    pub async fn reload_players(&self) -> Result<(), ApiError> {
        let ticket = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.filter.read().await.clone();
        self.board.write().await.set_loading(true);

        let result = self.api.list_players(&filter).await;

        if self.fetches.load(Ordering::SeqCst) != ticket {
            info!("Discarding player list #{} in favour of a newer fetch", ticket);
            return Ok(());
        }

        let outcome = {
            let mut board = self.board.write().await;
            match result {
                Ok(players) => {
                    info!("Loaded {} players", players.len());
                    board.replace_players(players);
                    Ok(())
                }
                Err(e) => {
                    error!("Failed to load players: {}", e);
                    board.set_error(e.user_message());
                    Err(e)
                }
            }
        };
        self.publish().await;
        outcome
    }

    /// Change the list filter. Search-only edits are debounced; anything else
    /// refetches immediately.
    pub async fn set_filter(self: &Arc<Self>, filter: PlayerFilter) -> Result<(), ApiError> {
        let previous = {
            let mut current = self.filter.write().await;
            std::mem::replace(&mut *current, filter.clone())
        };
        if previous == filter {
            return Ok(());
        }

        if previous.only_search_differs(&filter) {
            let desk = Arc::clone(self);
            self.search.schedule(async move {
                let _ = desk.reload_players().await;
            });
            return Ok(());
        }

        self.search.cancel();
        self.reload_players().await
    }

    async fn update_board<F, R>(&self, apply: F) -> R
    where
        F: FnOnce(&mut AuctionBoard) -> R,
    {
        let result = {
            let mut board = self.board.write().await;
            apply(&mut board)
        };
        self.publish().await;
        result
    }

    pub async fn open(&self, index: usize) -> Result<(), AuctionError> {
        self.update_board(|board| board.open(index)).await
    }

    pub async fn close(&self) {
        self.update_board(AuctionBoard::close).await
    }

    pub async fn next(&self) -> bool {
        self.update_board(AuctionBoard::next).await
    }

    pub async fn previous(&self) -> bool {
        self.update_board(AuctionBoard::previous).await
    }

    pub async fn key(&self, key: Key) -> bool {
        self.update_board(|board| board.handle_key(key)).await
    }

    pub async fn dismiss_alert(&self) {
        self.update_board(AuctionBoard::dismiss_alert).await
    }

    async fn owner_name(&self, owner_id: &str) -> String {
        self.owners
            .value()
            .await
            .and_then(|owners| {
                owners
                    .into_iter()
                    .find(|o| o.id == owner_id)
                    .map(|o| o.display_name().to_string())
            })
            .unwrap_or_else(|| owner_id.to_string())
    }

    /// Sell the open player to `owner_id` at the current bid. On success the
    /// player list and owners are refetched, the overlay is shown, and after
    /// it expires the desk moves to the player that was next in the category.
    pub async fn assign_owner(self: &Arc<Self>, owner_id: &str) -> Result<PendingSale, AppError> {
        let sale = self
            .update_board(|board| board.begin_assignment(owner_id))
            .await?;
        info!(
            "Assigning {} to {} for {}",
            sale.mobile_number, owner_id, sale.bid_amount
        );

        let assignment = PlayerAssignment::sold_to(owner_id, sale.bid_amount);
        if let Err(e) = self.api.update_player(&sale.mobile_number, &assignment).await {
            error!("Assignment of {} failed: {}", sale.mobile_number, e);
            let message = match &e {
                ApiError::Status { message, .. } => message.clone(),
                _ => "Failed to assign the player. Please try again.".to_string(),
            };
            self.update_board(|board| board.assignment_failed(owner_id, message))
                .await;
            return Err(e.into());
        }

        let (players, _) = tokio::join!(self.reload_players(), self.owners.refresh_silently());
        if let Err(e) = players {
            warn!("Player list refresh after sale failed: {}", e);
        }

        let owner_name = self.owner_name(owner_id).await;
        self.update_board(|board| board.assignment_succeeded(&sale, &owner_name))
            .await;

        let desk = Arc::clone(self);
        let next_mobile = sale.next_mobile.clone();
        tokio::spawn(async move {
            tokio::time::sleep(desk.celebration).await;
            let advanced = desk
                .update_board(|board| board.finish_celebration(next_mobile.as_deref()))
                .await;
            match next_mobile {
                Some(mobile) if advanced => info!("Advanced to {}", mobile),
                _ => info!("No next player in category; closing"),
            }
        });

        Ok(sale)
    }
}
