//! Application state for the maintenance planner API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PlannerConfig};

/// Shared application state.
///
/// Holds the server's default planner configuration. Requests may supply
/// their own configuration, which replaces this one for that request only.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the default planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        self.config.config()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConfigLoader::default())
    }
}
