//! The state store
//!
//! `Store` owns the session's `AppState` inside a `tokio::sync::watch`
//! channel. Every transition goes through [`reduce`] while holding the
//! channel's lock, so subscribers only ever see fully-applied states.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::provider::FactProvider;
use crate::state::{reduce, Action, AppState, RequestId};

pub struct Store {
    state: watch::Sender<AppState>,
    provider: RwLock<Arc<dyn FactProvider>>,
}

impl Store {
    pub fn new(provider: Arc<dyn FactProvider>) -> Self {
        Self::with_state(provider, AppState::default())
    }

    /// Start from a given state instead of the empty one.
    pub fn with_state(provider: Arc<dyn FactProvider>, state: AppState) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            state,
            provider: RwLock::new(provider),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: Action) {
        self.state.send_modify(|state| {
            *state = reduce(std::mem::take(state), action);
        });
    }

    /// Replace the fact provider. Fetches already in flight keep the old one.
    pub fn set_provider(&self, provider: Arc<dyn FactProvider>) {
        match self.provider.write() {
            Ok(mut guard) => *guard = provider,
            Err(poisoned) => *poisoned.into_inner() = provider,
        }
    }

    fn provider(&self) -> Arc<dyn FactProvider> {
        match self.provider.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Mark a fetch as started and return its token.
    pub fn begin_fetch(&self) -> RequestId {
        let mut request = 0;
        self.state.send_modify(|state| {
            *state = reduce(std::mem::take(state), Action::BeginFetch);
            request = state.latest_request();
        });
        request
    }

    /// Run the provider call for `request` and apply its outcome.
    pub async fn complete_fetch(&self, request: RequestId) {
        let provider = self.provider();
        match provider.fetch_fact().await {
            Ok(fact) => {
                info!(request, "fetched fact");
                self.dispatch(Action::FetchSucceeded { request, fact });
            }
            Err(error) => {
                warn!(request, %error, "fact fetch failed");
                self.dispatch(Action::FetchFailed { request, error });
            }
        }
    }

    pub async fn request_new_fact(&self) {
        let request = self.begin_fetch();
        self.complete_fetch(request).await;
    }

    /// Begin a fetch now and finish it on a background task.
    pub fn spawn_request(self: &Arc<Self>) -> JoinHandle<()> {
        let request = self.begin_fetch();
        let store = Arc::clone(self);
        tokio::spawn(async move { store.complete_fetch(request).await })
    }

    pub fn save_current_fact(&self) {
        self.dispatch(Action::SaveCurrentFact);
    }
}
