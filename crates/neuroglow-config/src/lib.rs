// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroglow Configuration System
//!
//! Type-safe configuration for the network animation with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//! - Typed partial updates ([`ConfigPatch`]) merged field by field
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroglow_config::{load_config, ConfigPatch};
//!
//! let mut config = load_config(None, None).expect("Failed to load config");
//! let outcome = config.apply_patch(ConfigPatch {
//!     decay_rate: Some(0.02),
//!     ..Default::default()
//! });
//! assert!(!outcome.topology_changed);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "std")]
pub mod loader;

pub mod patch;
pub mod types;
pub mod validation;

#[cfg(feature = "std")]
pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};

pub use patch::{ConfigPatch, PatchOutcome};
pub use types::*;
pub use validation::{sanitize_config, validate_config, ConfigValidationError};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "std")]
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[cfg(feature = "std")]
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "std")]
    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Invalid configuration patch: {0}")]
    PatchError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(feature = "std")]
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::PatchError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
