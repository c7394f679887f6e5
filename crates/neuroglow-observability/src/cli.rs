// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-neuroglow_viz` to raise one crate to debug
//! level. Dashes in crate names are accepted and normalized to underscores.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Per-crate debug switches
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
    /// Level for everything not explicitly enabled
    pub default_level: Option<String>,
}

fn normalize(crate_name: &str) -> String {
    crate_name.trim().replace('-', "_")
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut enabled_crates = HashMap::new();
        let mut debug_all = false;

        for arg in args {
            if arg == "--debug-all" {
                debug_all = true;
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                enabled_crates.insert(normalize(crate_name), true);
            }
        }

        if debug_all {
            for crate_name in KNOWN_CRATES {
                enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        CrateDebugFlags {
            enabled_crates,
            default_level: None,
        }
    }

    /// Use `level` for crates without a debug flag (defaults to `info`)
    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = Some(level.into().to_lowercase());
        self
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(&normalize(crate_name))
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Filter string for `EnvFilter`
    ///
    /// Format: "neuroglow_viz=debug,info" or just the default level.
    pub fn to_filter_string(&self) -> String {
        let default_level = self.default_level.as_deref().unwrap_or("info");
        if self.enabled_crates.is_empty() {
            return default_level.to_string();
        }

        let mut names: Vec<&String> = self.enabled_crates.keys().collect();
        names.sort();
        let mut filters: Vec<String> = names.iter().map(|n| format!("{}=debug", n)).collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Parse debug flags from process arguments and `NEUROGLOW_DEBUG`
///
/// Environment variable format: comma-separated crate names or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var("NEUROGLOW_DEBUG") {
        if env_var == "all" {
            for crate_name in KNOWN_CRATES {
                flags.enabled_crates.insert(crate_name.to_string(), true);
            }
        } else {
            for crate_name in env_var.split(',') {
                if !crate_name.trim().is_empty() {
                    flags.enabled_crates.insert(normalize(crate_name), true);
                }
            }
        }
    }

    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  NEUROGLOW_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  NEUROGLOW_DEBUG=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}
