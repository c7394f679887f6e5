// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_config, ConfigError, ConfigResult, NeuroglowConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE_NAME: &str = "neuroglow.toml";

/// Find the neuroglow configuration file
///
/// Search order:
/// 1. `NEUROGLOW_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroglow.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NEUROGLOW_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEUROGLOW_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet NEUROGLOW_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroglowConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeuroglowConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Parse "4,7,7,3" into a layer list
fn parse_layers(value: &str) -> Option<Vec<usize>> {
    value
        .split(',')
        .map(|part| part.trim().parse::<usize>().ok())
        .collect()
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROGLOW_LAYERS` -> `topology.layers` (comma-separated)
/// - `NEUROGLOW_MAX_CONNECTIONS` -> `topology.max_connections_per_node`
/// - `NEUROGLOW_CURVED` -> `connections.curved`
/// - `NEUROGLOW_SEED` -> `system.seed`
/// - `NEUROGLOW_LOG_LEVEL` -> `system.log_level`
/// - `NEUROGLOW_DECAY_RATE` -> `dynamics.decay_rate`
/// - `NEUROGLOW_INPUT_PROBABILITY` -> `dynamics.input_activation_probability`
pub fn apply_environment_overrides(config: &mut NeuroglowConfig) {
    if let Ok(value) = env::var("NEUROGLOW_LAYERS") {
        match parse_layers(&value) {
            Some(layers) => config.topology.layers = layers,
            None => warn!("[CONFIG] Ignoring malformed NEUROGLOW_LAYERS={}", value),
        }
    }
    if let Ok(value) = env::var("NEUROGLOW_MAX_CONNECTIONS") {
        if let Ok(max) = value.parse::<usize>() {
            config.topology.max_connections_per_node = max;
        }
    }
    if let Ok(value) = env::var("NEUROGLOW_CURVED") {
        config.connections.curved = parse_bool(&value);
    }
    if let Ok(value) = env::var("NEUROGLOW_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.system.seed = Some(seed);
        }
    }
    if let Ok(value) = env::var("NEUROGLOW_LOG_LEVEL") {
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("NEUROGLOW_DECAY_RATE") {
        if let Ok(rate) = value.parse::<f32>() {
            config.dynamics.decay_rate = rate;
        }
    }
    if let Ok(value) = env::var("NEUROGLOW_INPUT_PROBABILITY") {
        if let Ok(p) = value.parse::<f32>() {
            config.dynamics.input_activation_probability = p;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// Supported keys: `layers`, `max_connections`, `curved`, `seed`, `log_level`,
/// `decay_rate`, `input_probability`, `threshold`, `boost`
pub fn apply_cli_overrides(config: &mut NeuroglowConfig, args: &HashMap<String, String>) {
    if let Some(value) = args.get("layers") {
        match parse_layers(value) {
            Some(layers) => config.topology.layers = layers,
            None => warn!("[CONFIG] Ignoring malformed --layers {}", value),
        }
    }
    if let Some(value) = args.get("max_connections") {
        if let Ok(max) = value.parse::<usize>() {
            config.topology.max_connections_per_node = max;
        }
    }
    if let Some(value) = args.get("curved") {
        config.connections.curved = parse_bool(value);
    }
    if let Some(value) = args.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.system.seed = Some(seed);
        }
    }
    if let Some(value) = args.get("log_level") {
        config.system.log_level = value.clone();
    }
    if let Some(value) = args.get("decay_rate") {
        if let Ok(rate) = value.parse::<f32>() {
            config.dynamics.decay_rate = rate;
        }
    }
    if let Some(value) = args.get("input_probability") {
        if let Ok(p) = value.parse::<f32>() {
            config.dynamics.input_activation_probability = p;
        }
    }
    if let Some(value) = args.get("threshold") {
        if let Ok(t) = value.parse::<f32>() {
            config.dynamics.activation_threshold = t;
        }
    }
    if let Some(value) = args.get("boost") {
        if let Ok(b) = value.parse::<f32>() {
            config.dynamics.activation_boost = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
[topology]
layers = [3, 5, 2]

[dynamics]
decay_rate = 0.03
"#,
        );
        let config = load_config(Some(file.path()), None).unwrap();
        assert_eq!(config.topology.layers, vec![3, 5, 2]);
        assert_eq!(config.dynamics.decay_rate, 0.03);
        assert_eq!(config.glow.blur, 12.0);
    }

    #[test]
    fn test_cli_overrides_win() {
        let file = write_config("[topology]\nlayers = [3, 5, 2]\n");
        let mut cli = HashMap::new();
        cli.insert("layers".to_string(), "2, 2".to_string());
        cli.insert("seed".to_string(), "42".to_string());
        cli.insert("curved".to_string(), "no".to_string());
        let config = load_config(Some(file.path()), Some(&cli)).unwrap();
        assert_eq!(config.topology.layers, vec![2, 2]);
        assert_eq!(config.system.seed, Some(42));
        assert!(!config.connections.curved);
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[topology\nlayers = ");
        let err = load_config(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let file = write_config("[dynamics]\ninput_activation_probability = 4.0\n");
        let err = load_config(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_layers() {
        assert_eq!(parse_layers("4,7, 3"), Some(vec![4, 7, 3]));
        assert_eq!(parse_layers("4,x"), None);
    }
}
