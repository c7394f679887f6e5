// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroglow-observability
//!
//! Logging infrastructure shared by every neuroglow crate, with per-crate
//! debug flag support.
//!
//! ## Features
//! - `file-logging`: timestamped, rotating JSON log files (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known neuroglow crate names for debug flags
///
/// Names match `tracing` targets (module paths), hence underscores.
pub const KNOWN_CRATES: &[&str] = &[
    "neuroglow",
    "neuroglow_config",
    "neuroglow_npu_neural",
    "neuroglow_npu_burst_engine",
    "neuroglow_brain_development",
    "neuroglow_viz",
];
