pub mod app_config;
pub mod config;
pub mod pharmacies;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use pharmacies::{
    format_coordinate, format_distance, parse_distance, Coordinate, NewPharmacy, PharmacyRecord,
    SearchResult, DEFAULT_MAP_LEVEL,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("pharmacy name must not be empty")]
    EmptyName,

    #[error("invalid distance {0}: must be a finite, non-negative number")]
    NegativeDistance(f64),

    #[error("invalid distance text \"{0}\": expected a leading decimal such as \"150.00 m\"")]
    InvalidDistance(String),

    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    #[error("search result \"{name}\" has no coordinates and cannot be saved")]
    MissingCoordinates { name: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
