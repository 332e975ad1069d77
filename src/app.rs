use std::path::PathBuf;
use std::sync::Arc;

use futures_util::FutureExt;
use numfacts_core::{AppState, Config, FactCategory, FactProvider, NumbersApiClient, Store};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct App {
    pub should_quit: bool,

    // Store and the snapshot the view renders from
    pub store: Arc<Store>,
    pub state: AppState,
    updates: watch::Receiver<AppState>,

    // Fetches spawned on the runtime, reaped once finished
    fetch_tasks: Vec<JoinHandle<()>>,

    // Provider settings
    pub category: FactCategory,
    api_url: String,
    config: Config,
    config_path: Option<PathBuf>,

    // Animation state
    pub spinner_frame: usize,

    // Saved list selection and scroll offset
    pub saved_state: ListState,

    // Control areas for mouse hit-testing (updated during render)
    pub get_button_area: Option<Rect>,
    pub save_button_area: Option<Rect>,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let api_url = config.api_url();
        let category = config.category();
        info!(%api_url, category = category.as_str(), "starting with numbers api");

        let provider = Arc::new(NumbersApiClient::new(&api_url, category));
        let mut app = Self::with_provider(provider, AppState::default());
        app.api_url = api_url;
        app.category = category;
        app.config = config;
        app.config_path = config_path;
        app
    }

    /// App backed by any provider, starting from `state`. Category changes
    /// are kept in memory only.
    pub fn with_provider(provider: Arc<dyn FactProvider>, state: AppState) -> Self {
        let store = Arc::new(Store::with_state(provider, state));
        let updates = store.subscribe();
        let state = store.snapshot();
        let saved_state = ListState::default().with_selected(state.saved_count().checked_sub(1));

        Self {
            should_quit: false,
            store,
            state,
            updates,
            fetch_tasks: Vec::new(),
            category: FactCategory::default(),
            api_url: numfacts_core::provider::DEFAULT_API_URL.to_string(),
            config: Config::new(),
            config_path: None,
            spinner_frame: 0,
            saved_state,
            get_button_area: None,
            save_button_area: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.store.subscribe()
    }

    /// Pull the latest store state into the render snapshot. A newly saved
    /// fact becomes the selected row so the list scrolls to it.
    pub fn sync(&mut self) {
        let before = self.state.saved_count();
        self.state = self.updates.borrow_and_update().clone();

        let after = self.state.saved_count();
        if after > before {
            self.saved_state.select(Some(after - 1));
        }
    }

    pub fn request_new_fact(&mut self) {
        self.reap_fetch_tasks();
        self.fetch_tasks.push(self.store.spawn_request());
        self.sync();
    }

    /// Drop handles of finished fetches, logging any that panicked.
    fn reap_fetch_tasks(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.fetch_tasks)
            .into_iter()
            .partition(|task| task.is_finished());
        self.fetch_tasks = running;

        for task in finished {
            if let Some(Err(err)) = task.now_or_never() {
                error!(%err, "fact fetch task failed");
            }
        }
    }

    pub fn save_current_fact(&mut self) {
        self.sync();
        if self.state.can_save() {
            self.store.save_current_fact();
            self.sync();
        }
    }

    pub fn cycle_category(&mut self) {
        self.category = self.category.next();
        self.store
            .set_provider(Arc::new(NumbersApiClient::new(&self.api_url, self.category)));
        info!(category = self.category.as_str(), "switched fact category");

        self.config.category = Some(self.category.as_str().to_string());
        if let Some(path) = &self.config_path {
            if let Err(err) = self.config.save_to(path) {
                warn!(%err, path = %path.display(), "could not save config");
            }
        }
    }

    pub fn select_next_saved(&mut self) {
        let len = self.state.saved_count();
        if len == 0 {
            return;
        }
        let next = self.saved_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.saved_state.select(Some(next));
    }

    pub fn select_previous_saved(&mut self) {
        if self.state.saved_count() == 0 {
            return;
        }
        let prev = self.saved_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.saved_state.select(Some(prev));
    }

    pub fn tick(&mut self) {
        self.reap_fetch_tasks();
        if self.state.is_loading {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }
}

#[cfg(test)]
impl App {
    /// Wait for every spawned fetch to finish, then sync.
    pub async fn settle(&mut self) {
        for task in std::mem::take(&mut self.fetch_tasks) {
            task.await.expect("fetch task panicked");
        }
        self.sync();
    }
}
