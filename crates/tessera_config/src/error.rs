//! Errors raised while reading `tessera.toml`.

/// Why a configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML or names an unknown key.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A fraction-valued knob lies outside `[0, 1]`.
    #[error("{key} must be within [0, 1], got {value}")]
    FractionOutOfRange {
        /// Dotted key, e.g. `legalizer.group_refine_percent`.
        key: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The site search radius is zero or negative.
    #[error("surface.search_radius must be positive, got {0}")]
    NonPositiveRadius(i32),
}
