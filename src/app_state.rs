// =============================================================================
// Shared Application State
// =============================================================================
//
// One `Arc<AppState>` is handed to the axum router and every background
// task. The state is read-only after startup: the config is parsed once
// from the environment and the Yahoo client owns its connection pool.
// =============================================================================

use crate::config::AppConfig;
use crate::yahoo::YahooClient;

/// Immutable shared state for the HTTP handlers and background tasks.
pub struct AppState {
    pub config: AppConfig,
    pub yahoo: YahooClient,
}

impl AppState {
    /// Construct the shared state. The returned value is wrapped in `Arc`
    /// by the caller.
    pub fn new(config: AppConfig) -> Self {
        Self {
            yahoo: YahooClient::new(),
            config,
        }
    }
}
