//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::network::NetworkIndex;

/// Shared application state.
///
/// The index is immutable once built, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Network tables, indexed for lookup
    pub index: Arc<NetworkIndex>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(index: NetworkIndex, config: ServerConfig) -> Self {
        Self {
            index: Arc::new(index),
            config: Arc::new(config),
        }
    }
}
