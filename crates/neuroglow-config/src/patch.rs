// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Partial configuration updates
//!
//! A [`ConfigPatch`] names every recognized option as an `Option`. Applying it
//! overrides only the fields that are `Some`, then re-sanitizes the result, and
//! reports which parts of the engine need to react.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::validation::{check_layers, sanitize_config, ConfigValidationError};
use crate::{ConfigResult, NeuroglowConfig};

/// Field-by-field override of [`NeuroglowConfig`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigPatch {
    // Topology
    pub layers: Option<Vec<usize>>,
    pub horizontal_spacing: Option<f32>,
    pub vertical_spacing: Option<f32>,
    pub position_jitter: Option<f32>,
    pub max_connections_per_node: Option<usize>,

    // Nodes
    pub node_base_radius: Option<f32>,
    pub node_radius_variance: Option<f32>,
    pub node_pulse_magnitude: Option<f32>,
    pub node_pulse_speed: Option<f32>,
    pub node_dim_color: Option<String>,
    pub node_active_color: Option<String>,

    // Connections
    pub connection_dim_color: Option<String>,
    pub connection_active_palette: Option<Vec<String>>,
    pub connection_base_width: Option<f32>,
    pub connection_active_width: Option<f32>,
    pub connection_visibility_cutoff: Option<f32>,
    pub curved_connections: Option<bool>,
    pub curve_wobble: Option<f32>,

    // Glow
    pub glow_blur: Option<f32>,
    pub glow_color: Option<String>,

    // Dynamics
    pub input_activation_probability: Option<f32>,
    pub propagation_speed: Option<f32>,
    pub activation_threshold: Option<f32>,
    pub activation_boost: Option<f32>,
    pub decay_rate: Option<f32>,
    pub min_activation: Option<f32>,

    // System
    pub seed: Option<u64>,
}

/// What changed after applying a patch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchOutcome {
    /// Node positions, radii or wiring must be rebuilt
    pub topology_changed: bool,
    /// Colors, widths or glow must be re-resolved
    pub style_changed: bool,
    pub dynamics_changed: bool,
    /// Rejected or clamped fields
    pub warnings: Vec<ConfigValidationError>,
}

impl PatchOutcome {
    pub fn any_changed(&self) -> bool {
        self.topology_changed || self.style_changed || self.dynamics_changed
    }
}

impl ConfigPatch {
    /// Parse a patch from JSON (unknown keys are rejected)
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }
}

/// Assign `Some` values from the patch onto config fields
macro_rules! assign {
    ($patch:ident => $($src:ident : $dst:expr),* $(,)?) => {
        $(
            if let Some(value) = $patch.$src {
                $dst = value;
            }
        )*
    };
}

impl NeuroglowConfig {
    /// Merge a patch into this configuration
    ///
    /// Invalid layer lists are rejected (the previous layers stay), numeric
    /// fields are clamped into range. Both are reported as warnings.
    pub fn apply_patch(&mut self, patch: ConfigPatch) -> PatchOutcome {
        let before = self.clone();
        let mut warnings = Vec::new();

        if let Some(layers) = patch.layers {
            match check_layers(&layers) {
                Ok(()) => self.topology.layers = layers,
                Err(e) => {
                    warn!("[CONFIG] Rejected layer update: {}", e);
                    warnings.push(e);
                }
            }
        }

        assign!(patch =>
            horizontal_spacing: self.topology.horizontal_spacing,
            vertical_spacing: self.topology.vertical_spacing,
            position_jitter: self.topology.position_jitter,
            max_connections_per_node: self.topology.max_connections_per_node,
            node_base_radius: self.nodes.base_radius,
            node_radius_variance: self.nodes.radius_variance,
            node_pulse_magnitude: self.nodes.pulse_magnitude,
            node_pulse_speed: self.nodes.pulse_speed,
            node_dim_color: self.nodes.dim_color,
            node_active_color: self.nodes.active_color,
            connection_dim_color: self.connections.dim_color,
            connection_active_palette: self.connections.active_palette,
            connection_base_width: self.connections.base_width,
            connection_active_width: self.connections.active_width,
            connection_visibility_cutoff: self.connections.visibility_cutoff,
            curved_connections: self.connections.curved,
            curve_wobble: self.connections.curve_wobble,
            glow_blur: self.glow.blur,
            glow_color: self.glow.color,
            input_activation_probability: self.dynamics.input_activation_probability,
            propagation_speed: self.dynamics.propagation_speed,
            activation_threshold: self.dynamics.activation_threshold,
            activation_boost: self.dynamics.activation_boost,
            decay_rate: self.dynamics.decay_rate,
            min_activation: self.dynamics.min_activation,
        );
        if patch.seed.is_some() {
            self.system.seed = patch.seed;
        }

        let repaired = sanitize_config(self);
        for w in &repaired {
            warn!("[CONFIG] {}", w);
        }
        warnings.extend(repaired);

        let outcome = PatchOutcome {
            topology_changed: self.topology != before.topology
                || self.nodes.base_radius != before.nodes.base_radius
                || self.nodes.radius_variance != before.nodes.radius_variance
                || self.system.seed != before.system.seed,
            style_changed: self.nodes != before.nodes
                || self.connections != before.connections
                || self.glow != before.glow,
            dynamics_changed: self.dynamics != before.dynamics,
            warnings,
        };
        debug!(
            "[CONFIG] Patch applied: topology_changed={}, style_changed={}, dynamics_changed={}, warnings={}",
            outcome.topology_changed,
            outcome.style_changed,
            outcome.dynamics_changed,
            outcome.warnings.len()
        );
        outcome
    }
}
