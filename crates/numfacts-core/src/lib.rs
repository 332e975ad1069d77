pub mod config;
pub mod error;
pub mod provider;
pub mod state;
pub mod store;
pub mod testing;

// Re-export main types for convenience
pub use config::Config;
pub use error::FactError;
pub use provider::{FactCategory, FactProvider, NumbersApiClient};
pub use state::{Action, AppState, RequestId};
pub use store::Store;
