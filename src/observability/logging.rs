//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` overrides the configured level

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    if config.debug {
        "item_board=debug,tower_http=debug".to_string()
    } else {
        format!("item_board={0},tower_http={0}", config.log_level)
    }
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.debug {
        registry.with(fmt::layer().pretty()).try_init()
    } else {
        registry.with(fmt::layer().json()).try_init()
    }
}
