// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Two entry points:
//! - [`validate_config`] reports every problem and fails (used for loaded files)
//! - [`sanitize_config`] repairs problems in place and returns them as warnings
//!   (used by the engine, which must never refuse to animate)

use crate::{ConfigError, ConfigResult, NeuroglowConfig};

/// Largest accepted layer size
pub const MAX_LAYER_SIZE: usize = 4096;

/// Smallest accepted activation threshold (the trigger divides by it)
pub const MIN_ACTIVATION_THRESHOLD: f32 = 1e-6;

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    OutOfRange {
        field: String,
        value: f32,
        min: f32,
        max: f32,
    },
    NotFinite { field: String },
    InvalidLayers { reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "{} = {} is outside valid range [{}, {}]",
                    field, value, min, max
                )
            }
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
            Self::InvalidLayers { reason } => write!(f, "Invalid topology.layers: {}", reason),
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &NeuroglowConfig) -> ConfigResult<()> {
    let mut scratch = config.clone();
    let errors = sanitize_config(&mut scratch);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Repair out-of-range values in place
///
/// Numeric fields are clamped into range; non-finite values fall back to the
/// section default; an unusable layer list falls back to the default layers.
/// Returns one entry per repaired field.
pub fn sanitize_config(config: &mut NeuroglowConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    let defaults = NeuroglowConfig::default();

    if let Err(e) = check_layers(&config.topology.layers) {
        errors.push(e);
        config.topology.layers = defaults.topology.layers.clone();
    }

    let t = &mut config.topology;
    let dt = &defaults.topology;
    t.horizontal_spacing = clamp_field(
        "topology.horizontal_spacing",
        t.horizontal_spacing,
        0.0,
        1.0,
        dt.horizontal_spacing,
        &mut errors,
    );
    t.vertical_spacing = clamp_field(
        "topology.vertical_spacing",
        t.vertical_spacing,
        0.0,
        1.0,
        dt.vertical_spacing,
        &mut errors,
    );
    t.position_jitter = clamp_field(
        "topology.position_jitter",
        t.position_jitter,
        0.0,
        f32::MAX,
        dt.position_jitter,
        &mut errors,
    );

    let n = &mut config.nodes;
    let dn = &defaults.nodes;
    n.base_radius = clamp_field("nodes.base_radius", n.base_radius, 0.0, f32::MAX, dn.base_radius, &mut errors);
    n.radius_variance = clamp_field(
        "nodes.radius_variance",
        n.radius_variance,
        0.0,
        f32::MAX,
        dn.radius_variance,
        &mut errors,
    );
    n.pulse_magnitude = clamp_field(
        "nodes.pulse_magnitude",
        n.pulse_magnitude,
        0.0,
        f32::MAX,
        dn.pulse_magnitude,
        &mut errors,
    );
    n.pulse_speed = clamp_field("nodes.pulse_speed", n.pulse_speed, 0.0, f32::MAX, dn.pulse_speed, &mut errors);

    let c = &mut config.connections;
    let dc = &defaults.connections;
    c.base_width = clamp_field("connections.base_width", c.base_width, 0.0, f32::MAX, dc.base_width, &mut errors);
    c.active_width = clamp_field(
        "connections.active_width",
        c.active_width,
        0.0,
        f32::MAX,
        dc.active_width,
        &mut errors,
    );
    c.curve_wobble = clamp_field(
        "connections.curve_wobble",
        c.curve_wobble,
        0.0,
        f32::MAX,
        dc.curve_wobble,
        &mut errors,
    );
    c.visibility_cutoff = clamp_field(
        "connections.visibility_cutoff",
        c.visibility_cutoff,
        0.0,
        1.0,
        dc.visibility_cutoff,
        &mut errors,
    );

    config.glow.blur = clamp_field(
        "glow.blur",
        config.glow.blur,
        0.0,
        f32::MAX,
        defaults.glow.blur,
        &mut errors,
    );

    let d = &mut config.dynamics;
    let dd = &defaults.dynamics;
    d.input_activation_probability = clamp_field(
        "dynamics.input_activation_probability",
        d.input_activation_probability,
        0.0,
        1.0,
        dd.input_activation_probability,
        &mut errors,
    );
    d.propagation_speed = clamp_field(
        "dynamics.propagation_speed",
        d.propagation_speed,
        0.0,
        f32::MAX,
        dd.propagation_speed,
        &mut errors,
    );
    d.activation_threshold = clamp_field(
        "dynamics.activation_threshold",
        d.activation_threshold,
        MIN_ACTIVATION_THRESHOLD,
        f32::MAX,
        dd.activation_threshold,
        &mut errors,
    );
    d.activation_boost = clamp_field(
        "dynamics.activation_boost",
        d.activation_boost,
        0.0,
        f32::MAX,
        dd.activation_boost,
        &mut errors,
    );
    d.decay_rate = clamp_field("dynamics.decay_rate", d.decay_rate, 0.0, f32::MAX, dd.decay_rate, &mut errors);
    d.min_activation = clamp_field(
        "dynamics.min_activation",
        d.min_activation,
        0.0,
        f32::MAX,
        dd.min_activation,
        &mut errors,
    );

    errors
}

/// A layer list must be non-empty with every layer in `1..=MAX_LAYER_SIZE`
pub fn check_layers(layers: &[usize]) -> Result<(), ConfigValidationError> {
    if layers.is_empty() {
        return Err(ConfigValidationError::InvalidLayers {
            reason: "at least one layer is required".to_string(),
        });
    }
    if let Some(pos) = layers.iter().position(|&n| n == 0) {
        return Err(ConfigValidationError::InvalidLayers {
            reason: format!("layer {} has no nodes", pos),
        });
    }
    if let Some(pos) = layers.iter().position(|&n| n > MAX_LAYER_SIZE) {
        return Err(ConfigValidationError::InvalidLayers {
            reason: format!(
                "layer {} has {} nodes (max {})",
                pos, layers[pos], MAX_LAYER_SIZE
            ),
        });
    }
    Ok(())
}

/// Clamp one numeric field, recording a warning when it had to change
pub(crate) fn clamp_field(
    field: &str,
    value: f32,
    min: f32,
    max: f32,
    fallback: f32,
    errors: &mut Vec<ConfigValidationError>,
) -> f32 {
    if !value.is_finite() {
        errors.push(ConfigValidationError::NotFinite {
            field: field.to_string(),
        });
        return fallback;
    }
    if value < min || value > max {
        errors.push(ConfigValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
        return value.clamp(min, max);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_probability() {
        let mut config = NeuroglowConfig::default();
        config.dynamics.input_activation_probability = 3.0;
        config.dynamics.decay_rate = -1.0;
        let warnings = sanitize_config(&mut config);
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.dynamics.input_activation_probability, 1.0);
        assert_eq!(config.dynamics.decay_rate, 0.0);
    }

    #[test]
    fn test_non_finite_falls_back_to_default() {
        let mut config = NeuroglowConfig::default();
        config.glow.blur = f32::NAN;
        let warnings = sanitize_config(&mut config);
        assert!(matches!(warnings[0], ConfigValidationError::NotFinite { .. }));
        assert_eq!(config.glow.blur, NeuroglowConfig::default().glow.blur);
    }

    #[test]
    fn test_threshold_never_zero() {
        let mut config = NeuroglowConfig::default();
        config.dynamics.activation_threshold = 0.0;
        sanitize_config(&mut config);
        assert_eq!(config.dynamics.activation_threshold, MIN_ACTIVATION_THRESHOLD);
    }

    #[test]
    fn test_layers_rejected() {
        assert!(check_layers(&[]).is_err());
        assert!(check_layers(&[3, 0, 2]).is_err());
        assert!(check_layers(&[MAX_LAYER_SIZE + 1]).is_err());
        assert!(check_layers(&[1]).is_ok());

        let mut config = NeuroglowConfig::default();
        config.topology.layers = vec![];
        let warnings = sanitize_config(&mut config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.topology.layers, NeuroglowConfig::default().topology.layers);
    }

    #[test]
    fn test_validate_reports_all_fields() {
        let mut config = NeuroglowConfig::default();
        config.topology.horizontal_spacing = 2.0;
        config.connections.visibility_cutoff = -0.5;
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("topology.horizontal_spacing"));
        assert!(err.contains("connections.visibility_cutoff"));
    }
}
