// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neuroglow.toml`. Every section falls back to its `Default` field by field,
//! so a file only needs to mention what it changes.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroglowConfig {
    pub system: SystemConfig,
    pub topology: TopologyConfig,
    pub nodes: NodeStyleConfig,
    pub connections: ConnectionStyleConfig,
    pub glow: GlowConfig,
    pub dynamics: DynamicsConfig,
}

/// System-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    /// Seed for every random draw (topology, firing, curve wobble). `None` = entropy.
    pub seed: Option<u64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
        }
    }
}

/// Layer layout and wiring
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Node count per layer, input layer first
    pub layers: Vec<usize>,
    /// Fraction of surface width spanned by the layer bands
    pub horizontal_spacing: f32,
    /// Fraction of surface height spanned by each band
    pub vertical_spacing: f32,
    /// Total width of the uniform jitter applied to each coordinate
    pub position_jitter: f32,
    pub max_connections_per_node: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            layers: vec![4, 7, 7, 5, 3],
            horizontal_spacing: 0.8,
            vertical_spacing: 0.7,
            position_jitter: 12.0,
            max_connections_per_node: 3,
        }
    }
}

/// Node glyph appearance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeStyleConfig {
    pub base_radius: f32,
    pub radius_variance: f32,
    /// Radius swing of the breathing pulse at full activation
    pub pulse_magnitude: f32,
    /// Pulse angular speed (radians per second)
    pub pulse_speed: f32,
    pub dim_color: String,
    pub active_color: String,
}

impl Default for NodeStyleConfig {
    fn default() -> Self {
        Self {
            base_radius: 3.0,
            radius_variance: 1.0,
            pulse_magnitude: 1.5,
            pulse_speed: 2.0,
            dim_color: "rgba(90, 110, 170, 0.35)".to_string(),
            active_color: "rgba(190, 230, 255, 1.0)".to_string(),
        }
    }
}

/// Connection stroke appearance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionStyleConfig {
    pub dim_color: String,
    /// Ordered stops, dimmest first
    pub active_palette: Vec<String>,
    pub base_width: f32,
    pub active_width: f32,
    pub curved: bool,
    /// Maximum control-point offset of a curved connection at full activation
    pub curve_wobble: f32,
    /// Sources below this visual intensity draw none of their connections
    pub visibility_cutoff: f32,
}

impl Default for ConnectionStyleConfig {
    fn default() -> Self {
        Self {
            dim_color: "rgba(70, 90, 160, 0.08)".to_string(),
            active_palette: vec![
                "rgba(70, 110, 230, 0.25)".to_string(),
                "rgba(110, 170, 255, 0.55)".to_string(),
                "rgba(200, 240, 255, 0.9)".to_string(),
            ],
            base_width: 0.5,
            active_width: 2.0,
            curved: true,
            curve_wobble: 24.0,
            visibility_cutoff: 0.02,
        }
    }
}

/// Glow (blur shadow) appearance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Blur radius at full activation
    pub blur: f32,
    pub color: String,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            blur: 12.0,
            color: "rgba(150, 200, 255, 0.8)".to_string(),
        }
    }
}

/// Activation model parameters (all per tick)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DynamicsConfig {
    pub input_activation_probability: f32,
    pub propagation_speed: f32,
    pub activation_threshold: f32,
    pub activation_boost: f32,
    pub decay_rate: f32,
    pub min_activation: f32,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            input_activation_probability: 0.04,
            propagation_speed: 0.35,
            activation_threshold: 0.6,
            activation_boost: 0.6,
            decay_rate: 0.012,
            min_activation: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: NeuroglowConfig = serde_json::from_str(
            r#"{ "topology": { "layers": [2, 2] }, "dynamics": { "decay_rate": 0.05 } }"#,
        )
        .unwrap();
        assert_eq!(config.topology.layers, vec![2, 2]);
        assert_eq!(config.topology.max_connections_per_node, 3);
        assert_eq!(config.dynamics.decay_rate, 0.05);
        assert_eq!(config.dynamics.activation_threshold, 0.6);
        assert_eq!(config.nodes, NodeStyleConfig::default());
    }
}
