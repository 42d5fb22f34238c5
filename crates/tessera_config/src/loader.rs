//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::TesseraConfig;
use std::path::Path;

/// Loads and validates a `tessera.toml` configuration from `path`.
pub fn load_config(path: &Path) -> Result<TesseraConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `tessera.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<TesseraConfig, ConfigError> {
    let config: TesseraConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are in range.
fn validate_config(config: &TesseraConfig) -> Result<(), ConfigError> {
    let lg = &config.legalizer;
    for (key, value) in [
        ("legalizer.group_refine_percent", lg.group_refine_percent),
        (
            "legalizer.non_group_refine_percent",
            lg.non_group_refine_percent,
        ),
        (
            "legalizer.brick_utilization_threshold",
            lg.brick_utilization_threshold,
        ),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::FractionOutOfRange { key, value });
        }
    }
    if config.surface.search_radius <= 0 {
        return Err(ConfigError::NonPositiveRadius(
            config.surface.search_radius,
        ));
    }
    Ok(())
}
