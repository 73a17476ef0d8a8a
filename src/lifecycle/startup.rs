//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any config error is fatal
//! - Command-line flags override the config file, then the merged result
//!   is validated once

use std::path::Path;

use crate::config::{load_config, validate_config, AppConfig, ConfigError};

/// Settings that may be given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub debug: bool,
}

/// Load the config file (or defaults) and apply command-line overrides.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(bind_address) = overrides.bind_address {
        config.listener.bind_address = bind_address;
    }
    if overrides.debug {
        config.observability.debug = true;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
