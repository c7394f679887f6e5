// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Node State Update (Phase 2)
//!
//! ## Algorithm (per node)
//! 1. Decay by `decay_rate` when above ε
//! 2. Input nodes fire with `input_activation_probability`;
//!    other nodes fire when `incoming_signal >= activation_threshold`
//! 3. Clamp at 0
//!
//! `incoming_signal` is left untouched here; phase 1 of the next tick resets
//! it. That keeps this function callable on its own with hand-set signals.

use neuroglow_npu_neural::{
    apply_decay, clamp_activation, input_boost, is_active, threshold_boost, ActivationParameters,
    Topology,
};
use rand::Rng;
use serde::Serialize;
use tracing::trace;

/// Result of one state update pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DynamicsResult {
    pub nodes_processed: usize,
    /// Input nodes that fired at random
    pub input_firings: usize,
    /// Non-input nodes whose incoming signal crossed the threshold
    pub threshold_firings: usize,
    /// Nodes above ε after the update
    pub active_nodes: usize,
    pub total_activation: f32,
}

/// Apply decay, triggers and clamping to every node
///
/// Draws exactly one random number per input node.
pub fn update_node_states<R: Rng + ?Sized>(
    topology: &mut Topology,
    params: &ActivationParameters,
    rng: &mut R,
) -> DynamicsResult {
    let mut result = DynamicsResult::default();

    for node in topology.nodes_mut() {
        let mut activation = apply_decay(node.activation_level, params.decay_rate, params.min_activation);

        if node.is_input() {
            if rng.gen::<f32>() < params.input_activation_probability {
                activation = input_boost(activation, params.activation_boost);
                result.input_firings += 1;
            }
        } else if let Some(boosted) = threshold_boost(
            activation,
            node.incoming_signal,
            params.activation_threshold,
            params.activation_boost,
        ) {
            activation = boosted;
            result.threshold_firings += 1;
        }

        node.activation_level = clamp_activation(activation);

        result.nodes_processed += 1;
        if is_active(node.activation_level, params.min_activation) {
            result.active_nodes += 1;
        }
        result.total_activation += node.activation_level;
    }

    trace!(
        "[DYNAMICS] {} nodes, {} input firings, {} threshold firings, {} active",
        result.nodes_processed,
        result.input_firings,
        result.threshold_firings,
        result.active_nodes
    );
    result
}
