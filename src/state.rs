use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Settings;
use crate::services::auction_desk::AuctionDesk;
use crate::services::gateway::TournamentApi;
use crate::services::provider::{
    DetailsProvider, OwnersProvider, Visibility, details_provider, owners_provider,
};
use crate::services::registration::Registration;
use crate::services::websocket::{send_details_update, send_owners_update};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub api: Arc<dyn TournamentApi>,
    pub owners: Arc<OwnersProvider>,
    pub details: Arc<DetailsProvider>,
    pub desk: Arc<AuctionDesk>,
    pub registration: Arc<Registration>,
    pub visibility: Visibility,
    pub tx: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(settings: Settings, api: Arc<dyn TournamentApi>) -> Self {
        let (tx, _rx) = broadcast::channel::<String>(100);
        let owners = Arc::new(owners_provider(Arc::clone(&api)));
        let details = Arc::new(details_provider(Arc::clone(&api)));
        let desk = AuctionDesk::new(Arc::clone(&api), Arc::clone(&owners), &settings, tx.clone());
        let registration = Arc::new(Registration::new(
            Arc::clone(&api),
            Arc::clone(&details),
            settings.debounce,
        ));

        Self {
            settings: Arc::new(settings),
            api,
            owners,
            details,
            desk,
            registration,
            visibility: Visibility::new(true),
            tx,
        }
    }

    /// Initial fetches plus the background tasks: provider polling and the
    /// relays that push provider changes to subscribers.
    pub async fn start(&self) -> Vec<JoinHandle<()>> {
        tokio::join!(self.owners.ensure_loaded(), self.details.ensure_loaded());
        // A failed first load is already recorded as the page error.
        let _ = self.desk.reload_players().await;
        info!("Initial data loaded.");

        let period = self.settings.poll_interval;
        let mut tasks = vec![
            self.owners.spawn_polling(period, self.visibility.subscribe()),
            self.details.spawn_polling(period, self.visibility.subscribe()),
        ];

        let owners = Arc::clone(&self.owners);
        let tx = self.tx.clone();
        tasks.push(tokio::spawn(async move {
            let mut changes = owners.changes();
            while changes.changed().await.is_ok() {
                if let Some(list) = owners.value().await {
                    send_owners_update(&tx, list);
                }
            }
        }));

        let details = Arc::clone(&self.details);
        let tx = self.tx.clone();
        tasks.push(tokio::spawn(async move {
            let mut changes = details.changes();
            while changes.changed().await.is_ok() {
                if let Some(value) = details.value().await {
                    send_details_update(&tx, value);
                }
            }
        }));

        tasks
    }
}
