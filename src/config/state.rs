// Application state module
// Immutable shared state handed to every connection task

use crate::config::Config;
use crate::registry::HandlerRegistry;

/// Application state: the configuration and the handler registry, both
/// fixed before the server starts accepting. Connection tasks share it
/// behind an `Arc` and never mutate it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: HandlerRegistry,
}

impl AppState {
    pub fn new(config: Config, registry: HandlerRegistry) -> Self {
        Self { config, registry }
    }
}
