//! `tessera.toml`: legalizer tuning and placement-surface settings.
//!
//! Every key is optional. [`load_config`] reads a file and
//! [`load_config_from_str`] parses text; both reject out-of-range values
//! with a [`ConfigError`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{LegalizerConfig, SurfaceConfig, TesseraConfig};
