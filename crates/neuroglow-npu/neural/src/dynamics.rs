// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Activation Rules
//!
//! Pure per-node rules used by the burst engine's activation pass.
//!
//! ```text
//! Propagation (per active source, per outgoing connection):
//!     strength = activation × propagation_speed
//!
//! State update:
//!     if activation > ε:  activation -= decay_rate
//!     input node fires:   activation = max(activation, 0.1) + boost
//!     threshold crossed:  activation = max(activation, 0.1) + boost × (signal / threshold)
//!     activation = max(0, activation)
//! ```
//!
//! All quantities are per tick.

/// Activation a node is lifted to before a boost is added
pub const ACTIVATION_FLOOR: f32 = 0.1;

/// Upper bound of the visual intensity range
pub const VISUAL_CEILING: f32 = 1.0;

/// Parameters of the activation model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationParameters {
    /// Probability an input node fires on a given tick (0.0-1.0)
    pub input_activation_probability: f32,
    /// Fraction of a source's activation delivered along each connection
    pub propagation_speed: f32,
    /// Incoming signal needed to trigger a non-input node (> 0)
    pub activation_threshold: f32,
    pub activation_boost: f32,
    pub decay_rate: f32,
    /// ε: activations at or below this neither propagate nor decay
    pub min_activation: f32,
}

impl Default for ActivationParameters {
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

/// Whether a node takes part in propagation and decay
#[inline(always)]
pub fn is_active(activation: f32, min_activation: f32) -> bool {
    activation > min_activation
}

/// Strength delivered along each outgoing connection of an active source
#[inline(always)]
pub fn propagation_strength(activation: f32, propagation_speed: f32) -> f32 {
    activation * propagation_speed
}

/// Subtract `decay_rate` when above ε (not clamped; see [`clamp_activation`])
#[inline(always)]
pub fn apply_decay(activation: f32, decay_rate: f32, min_activation: f32) -> f32 {
    if is_active(activation, min_activation) {
        activation - decay_rate
    } else {
        activation
    }
}

/// Random input firing
#[inline(always)]
pub fn input_boost(activation: f32, activation_boost: f32) -> f32 {
    activation.max(ACTIVATION_FLOOR) + activation_boost
}

/// Threshold trigger, or `None` when the signal stays below threshold
///
/// The boost scales with how far the accumulated signal exceeds the threshold.
#[inline(always)]
pub fn threshold_boost(
    activation: f32,
    incoming_signal: f32,
    activation_threshold: f32,
    activation_boost: f32,
) -> Option<f32> {
    if incoming_signal >= activation_threshold {
        Some(
            activation.max(ACTIVATION_FLOOR)
                + activation_boost * (incoming_signal / activation_threshold),
        )
    } else {
        None
    }
}

#[inline(always)]
pub fn clamp_activation(activation: f32) -> f32 {
    activation.max(0.0)
}

/// Activation capped into [0, 1] for every visual computation
#[inline(always)]
pub fn visual_intensity(activation: f32) -> f32 {
    if activation.is_nan() {
        return 0.0;
    }
    activation.clamp(0.0, VISUAL_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_only_above_epsilon() {
        assert_eq!(apply_decay(0.5, 0.25, 0.01), 0.25);
        assert_eq!(apply_decay(0.01, 0.1, 0.01), 0.01);
        assert_eq!(clamp_activation(apply_decay(0.05, 0.1, 0.01)), 0.0);
    }

    #[test]
    fn test_input_boost_lifts_to_floor() {
        assert_eq!(input_boost(0.0, 0.5), 0.1 + 0.5);
        assert_eq!(input_boost(0.8, 0.5), 0.8 + 0.5);
    }

    #[test]
    fn test_threshold_boost_scales_with_signal() {
        assert_eq!(threshold_boost(0.0, 0.5, 0.6, 1.5), None);
        let boosted = threshold_boost(0.0, 1.0, 0.6, 1.5).unwrap();
        assert_eq!(boosted, 0.1_f32.max(0.0) + 1.5 * (1.0 / 0.6));
        assert!((boosted - 2.6).abs() < 1e-5);
        // Exactly at threshold counts as crossing
        assert_eq!(threshold_boost(0.3, 0.6, 0.6, 1.0), Some(0.3 + 1.0));
    }

    #[test]
    fn test_visual_intensity_clamps() {
        assert_eq!(visual_intensity(2.6), 1.0);
        assert_eq!(visual_intensity(-1.0), 0.0);
        assert_eq!(visual_intensity(f32::NAN), 0.0);
        assert_eq!(visual_intensity(0.25), 0.25);
    }
}
