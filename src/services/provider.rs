//! Long-lived caches shared by every page: owners and the tournament
//! configuration. Each is fetched once, then refreshed silently on a fixed
//! interval while the desk is visible. A failed refresh keeps the last good
//! value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::Serialize;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::dto::{details_dto::FrontendDetails, owner_dto::Owner};
use crate::error::ApiError;
use crate::services::gateway::TournamentApi;

pub type OwnersProvider = Provider<Vec<Owner>>;
pub type DetailsProvider = Provider<FrontendDetails>;

type Loader<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSnapshot<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> Default for ProviderSnapshot<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
            last_updated: None,
        }
    }
}

pub struct Provider<T> {
    name: &'static str,
    state: RwLock<ProviderSnapshot<T>>,
    started: AtomicBool,
    load: Loader<T>,
    /// Bumped after every successful fetch.
    version: watch::Sender<u64>,
}

impl<T> Provider<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F>(name: &'static str, load: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static,
    {
        Self {
            name,
            state: RwLock::new(ProviderSnapshot::default()),
            started: AtomicBool::new(false),
            load: Box::new(load),
            version: watch::channel(0).0,
        }
    }

    pub async fn snapshot(&self) -> ProviderSnapshot<T> {
        self.state.read().await.clone()
    }

    pub async fn value(&self) -> Option<T> {
        self.state.read().await.value.clone()
    }

    /// Notified after each successful fetch.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// First fetch. Only the first caller performs it; later callers return
    /// immediately.
    pub async fn ensure_loaded(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        self.refresh().await;
    }

    /// Fetch with the loading flag raised. Returns whether it succeeded.
    pub async fn refresh(&self) -> bool {
        self.state.write().await.loading = true;
        self.run(true).await
    }

    /// Background fetch that never touches the loading flag.
    pub async fn refresh_silently(&self) -> bool {
        self.run(false).await
    }

    async fn run(&self, loud: bool) -> bool {
        let result = (self.load)().await;

        let mut guard = self.state.write().await;
        if loud {
            guard.loading = false;
        }
        match result {
            Ok(value) => {
                guard.value = Some(value);
                guard.error = None;
                guard.last_updated = Some(Utc::now());
                self.version.send_modify(|v| *v += 1);
                true
            }
            Err(e) => {
                warn!("Refreshing {} failed: {}", self.name, e);
                guard.error = Some(e.user_message());
                false
            }
        }
    }

    /// Poll every `period` while `visible` is true. The first tick fires one
    /// full period after spawning.
    pub fn spawn_polling(
        self: &Arc<Self>,
        period: Duration,
        visible: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let provider = Arc::clone(self);
        tokio::spawn(async move {
            info!("Polling {} every {:?}", provider.name, period);
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if *visible.borrow() {
                    provider.refresh_silently().await;
                }
            }
        })
    }
}

pub fn owners_provider(api: Arc<dyn TournamentApi>) -> OwnersProvider {
    Provider::new("owners", move || {
        let api = Arc::clone(&api);
        async move { api.owners().await }.boxed()
    })
}

pub fn details_provider(api: Arc<dyn TournamentApi>) -> DetailsProvider {
    Provider::new("frontend details", move || {
        let api = Arc::clone(&api);
        async move { api.frontend_details().await }.boxed()
    })
}

/// Stand-in for the browser's document visibility.
#[derive(Clone)]
pub struct Visibility {
    tx: Arc<watch::Sender<bool>>,
}

impl Visibility {
    pub fn new(visible: bool) -> Self {
        let (tx, _rx) = watch::channel(visible);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, visible: bool) {
        self.tx.send_replace(visible);
    }

    pub fn is_visible(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
