use std::sync::Arc;

use kagami_config::Config;
use tokio::sync::RwLock;

/// Shared application state
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }
}
