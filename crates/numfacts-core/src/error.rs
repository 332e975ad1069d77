use thiserror::Error;

/// Errors raised by a fact provider.
///
/// The store catches these at its boundary; they end up as a message in
/// `AppState::last_error` and never reach the UI as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactError {
    #[error("failed to fetch fact: {0}")]
    FetchFailed(String),
}

impl FactError {
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        FactError::FetchFailed(reason.into())
    }
}

impl From<reqwest::Error> for FactError {
    fn from(err: reqwest::Error) -> Self {
        FactError::FetchFailed(err.to_string())
    }
}
