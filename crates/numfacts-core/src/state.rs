//! UI-agnostic application state and its transitions
//!
//! `AppState` is the whole fact-related state of a session. It only changes
//! through [`reduce`], which maps `(state, action)` to the next state without
//! doing any I/O. The store in `crate::store` owns the state and runs the
//! provider calls that produce the fetch actions.

use tracing::debug;

use crate::error::FactError;

/// Token identifying one fetch. Issued in increasing order by `BeginFetch`.
pub type RequestId = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// The most recently fetched fact, cleared once it is saved.
    pub current_fact: Option<String>,
    /// Facts the user chose to keep, oldest first. Duplicates are allowed.
    pub saved_facts: Vec<String>,
    pub is_loading: bool,
    /// Message of the last failed fetch, cleared when a new fetch begins.
    pub last_error: Option<String>,
    latest_request: RequestId,
}

impl AppState {
    /// State with a fact already on display, as if a fetch had just resolved.
    pub fn with_current_fact(fact: impl Into<String>) -> Self {
        Self {
            current_fact: Some(fact.into()),
            ..Self::default()
        }
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    /// The fact shown to the user. Hidden while a fetch is outstanding.
    pub fn displayed_fact(&self) -> Option<&str> {
        if self.is_loading {
            None
        } else {
            self.current_fact.as_deref()
        }
    }

    /// Whether the "Save that fact" control is available.
    pub fn can_save(&self) -> bool {
        self.displayed_fact().is_some()
    }

    pub fn saved_count(&self) -> usize {
        self.saved_facts.len()
    }
}

/// Every transition the store can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A new fetch started. Supersedes any fetch still outstanding.
    BeginFetch,
    FetchSucceeded { request: RequestId, fact: String },
    FetchFailed { request: RequestId, error: FactError },
    SaveCurrentFact,
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::BeginFetch => {
            state.latest_request += 1;
            state.is_loading = true;
            state.last_error = None;
        }
        Action::FetchSucceeded { request, fact } => {
            if request != state.latest_request {
                debug!(request, latest = state.latest_request, "dropping superseded fact");
                return state;
            }
            state.current_fact = Some(fact);
            state.is_loading = false;
        }
        Action::FetchFailed { request, error } => {
            if request != state.latest_request {
                debug!(request, latest = state.latest_request, "dropping superseded failure");
                return state;
            }
            state.is_loading = false;
            state.last_error = Some(error.to_string());
        }
        Action::SaveCurrentFact => {
            // No-op without a fact
            if let Some(fact) = state.current_fact.take() {
                state.saved_facts.push(fact);
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(state: AppState, fact: &str) -> AppState {
        let state = reduce(state, Action::BeginFetch);
        let request = state.latest_request();
        reduce(state, Action::FetchSucceeded { request, fact: fact.to_string() })
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = AppState::default();
        assert_eq!(state.current_fact, None);
        assert!(state.saved_facts.is_empty());
        assert!(!state.is_loading);
        assert!(!state.can_save());
    }

    #[test]
    fn test_begin_fetch_sets_loading() {
        let state = reduce(AppState::default(), Action::BeginFetch);
        assert!(state.is_loading);
        assert_eq!(state.latest_request(), 1);
        assert!(!state.can_save());
    }

    #[test]
    fn test_fetch_success_sets_current_fact() {
        let state = fetched(AppState::default(), "Random fact");
        assert_eq!(state.current_fact.as_deref(), Some("Random fact"));
        assert!(!state.is_loading);
        assert!(state.can_save());
    }

    #[test]
    fn test_loading_hides_previous_fact() {
        let state = fetched(AppState::default(), "First random fact");
        let state = reduce(state, Action::BeginFetch);
        assert_eq!(state.current_fact.as_deref(), Some("First random fact"));
        assert_eq!(state.displayed_fact(), None);
        assert!(!state.can_save());
    }

    #[test]
    fn test_save_appends_and_clears() {
        let state = reduce(AppState::with_current_fact("Random fact"), Action::SaveCurrentFact);
        assert_eq!(state.saved_facts, vec!["Random fact".to_string()]);
        assert_eq!(state.current_fact, None);
    }

    #[test]
    fn test_save_without_fact_is_noop() {
        let state = reduce(AppState::default(), Action::SaveCurrentFact);
        assert!(state.saved_facts.is_empty());

        let state = reduce(AppState::with_current_fact("Random fact"), Action::SaveCurrentFact);
        let state = reduce(state, Action::SaveCurrentFact);
        assert_eq!(state.saved_facts, vec!["Random fact".to_string()]);
    }

    #[test]
    fn test_saved_facts_keep_insertion_order() {
        let state = fetched(AppState::default(), "First random fact");
        let state = reduce(state, Action::SaveCurrentFact);
        let state = fetched(state, "Second random fact");
        let state = reduce(state, Action::SaveCurrentFact);
        assert_eq!(
            state.saved_facts,
            vec!["First random fact".to_string(), "Second random fact".to_string()]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let state = fetched(AppState::default(), "7 is prime");
        let state = reduce(state, Action::SaveCurrentFact);
        let state = fetched(state, "7 is prime");
        let state = reduce(state, Action::SaveCurrentFact);
        assert_eq!(state.saved_count(), 2);
    }

    #[test]
    fn test_new_fact_replaces_unsaved_fact() {
        let state = fetched(AppState::default(), "First random fact");
        let state = fetched(state, "Second random fact");
        assert_eq!(state.current_fact.as_deref(), Some("Second random fact"));
        assert!(state.saved_facts.is_empty());
    }

    #[test]
    fn test_superseded_result_is_ignored() {
        let state = reduce(AppState::default(), Action::BeginFetch);
        let first = state.latest_request();
        let state = reduce(state, Action::BeginFetch);
        let second = state.latest_request();

        let state = reduce(state, Action::FetchSucceeded { request: first, fact: "stale".into() });
        assert!(state.is_loading);
        assert_eq!(state.current_fact, None);

        let state = reduce(state, Action::FetchSucceeded { request: second, fact: "fresh".into() });
        assert!(!state.is_loading);
        assert_eq!(state.current_fact.as_deref(), Some("fresh"));

        let state = reduce(state, Action::FetchFailed {
            request: first,
            error: FactError::fetch_failed("late"),
        });
        assert_eq!(state.current_fact.as_deref(), Some("fresh"));
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_failure_keeps_prior_fact() {
        let state = fetched(AppState::default(), "First random fact");
        let state = reduce(state, Action::BeginFetch);
        let request = state.latest_request();
        let state = reduce(state, Action::FetchFailed {
            request,
            error: FactError::fetch_failed("timeout"),
        });

        assert!(!state.is_loading);
        assert_eq!(state.current_fact.as_deref(), Some("First random fact"));
        assert_eq!(state.last_error.as_deref(), Some("failed to fetch fact: timeout"));

        let state = reduce(state, Action::BeginFetch);
        assert_eq!(state.last_error, None);
    }
}
