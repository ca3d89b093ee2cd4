//! Process-wide event bus for components that cannot be handed one.
//!
//! Prefer constructing an [`EventBus`] at the composition root and passing
//! clones of it around. The global bus is created from the environment
//! (see [`BusConfig::from_env`]) on first access and lives for the rest of the
//! process.

use std::sync::OnceLock;
use tracing::{info, warn};

use crate::config::BusConfig;
use crate::event::EventBus;

static GLOBAL: OnceLock<EventBus> = OnceLock::new();

/// Returns the process-wide bus, creating it on first call
pub fn global() -> &'static EventBus {
    GLOBAL.get_or_init(|| {
        let config = BusConfig::from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Invalid bus configuration in environment, using defaults");
            BusConfig::default()
        });
        info!(name = %config.name, "Initializing global event bus");
        EventBus::with_config(config)
    })
}
