// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Signal Propagation (Phase 1)
//!
//! Every node whose activation exceeds ε sends
//! `activation × propagation_speed` along each outgoing connection.
//!
//! ## Two passes
//! 1. **Gather**: contributions are collected into a scratch buffer while the
//!    topology is only read, so every source sees the same frozen activations.
//! 2. **Apply**: incoming signals are reset and the buffer is summed into the
//!    targets.
//!
//! The scratch buffer is kept between ticks to avoid reallocating.

use neuroglow_npu_neural::{is_active, propagation_strength, ActivationParameters, Topology};
use serde::Serialize;
use tracing::trace;

/// Counts for one propagation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PropagationStats {
    /// Nodes above ε that sent signal
    pub active_sources: usize,
    /// Individual source -> target deliveries
    pub contributions: usize,
}

/// Phase 1 engine with a reusable scratch buffer
#[derive(Debug, Default)]
pub struct SynapticPropagationEngine {
    /// (target index, strength) gathered from the frozen snapshot
    scratch: Vec<(usize, f32)>,
}

impl SynapticPropagationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every incoming signal and deliver this tick's contributions
    pub fn propagate(&mut self, topology: &mut Topology, params: &ActivationParameters) -> PropagationStats {
        let mut stats = PropagationStats::default();
        self.scratch.clear();

        // Gather
        for node in topology.nodes() {
            if !is_active(node.activation_level, params.min_activation) {
                continue;
            }
            stats.active_sources += 1;
            let strength = propagation_strength(node.activation_level, params.propagation_speed);
            self.scratch
                .extend(node.outgoing.iter().map(|c| (c.target.index(), strength)));
        }
        stats.contributions = self.scratch.len();

        // Apply
        let nodes = topology.nodes_mut();
        for node in nodes.iter_mut() {
            node.incoming_signal = 0.0;
        }
        for &(target, strength) in &self.scratch {
            if let Some(node) = nodes.get_mut(target) {
                node.incoming_signal += strength;
            }
        }

        trace!(
            "[PROPAGATION] {} active sources delivered {} contributions",
            stats.active_sources,
            stats.contributions
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroglow_npu_neural::Position;

    /// Layer 0: a, b; layer 1: c. Both inputs connect to c.
    fn fan_in() -> Topology {
        let mut topology = Topology::new(1);
        topology.begin_layer();
        let a = topology.push_node(Position::new(0.0, 0.0), 2.0);
        let b = topology.push_node(Position::new(0.0, 10.0), 2.0);
        topology.begin_layer();
        let c = topology.push_node(Position::new(10.0, 5.0), 2.0);
        topology.connect(a, c).unwrap();
        topology.connect(b, c).unwrap();
        topology
    }

    fn params(speed: f32) -> ActivationParameters {
        ActivationParameters {
            propagation_speed: speed,
            ..Default::default()
        }
    }

    #[test]
    fn test_contributions_sum_at_target() {
        let mut topology = fan_in();
        topology.nodes_mut()[0].activation_level = 1.0;
        topology.nodes_mut()[1].activation_level = 0.5;

        let mut engine = SynapticPropagationEngine::new();
        let stats = engine.propagate(&mut topology, &params(0.5));

        assert_eq!(stats.active_sources, 2);
        assert_eq!(stats.contributions, 2);
        assert_eq!(topology.nodes()[2].incoming_signal, 0.75);
        assert_eq!(topology.nodes()[0].incoming_signal, 0.0);
    }

    #[test]
    fn test_sources_at_epsilon_are_silent() {
        let mut topology = fan_in();
        topology.nodes_mut()[0].activation_level = 0.01;

        let mut engine = SynapticPropagationEngine::new();
        let stats = engine.propagate(&mut topology, &params(1.0));
        assert_eq!(stats.active_sources, 0);
        assert_eq!(topology.nodes()[2].incoming_signal, 0.0);
    }

    #[test]
    fn test_incoming_reset_each_tick() {
        let mut topology = fan_in();
        topology.nodes_mut()[0].activation_level = 1.0;
        let mut engine = SynapticPropagationEngine::new();
        engine.propagate(&mut topology, &params(1.0));
        assert_eq!(topology.nodes()[2].incoming_signal, 1.0);

        topology.nodes_mut()[0].activation_level = 0.0;
        let stats = engine.propagate(&mut topology, &params(1.0));
        assert_eq!(topology.nodes()[2].incoming_signal, 0.0);
        assert_eq!(stats.contributions, 0);
    }

    #[test]
    fn test_reads_frozen_snapshot() {
        // Chain a -> b -> c: a's delivery must not make b a source in the same tick
        let mut topology = Topology::new(1);
        let a = topology.push_node(Position::new(0.0, 0.0), 2.0);
        topology.begin_layer();
        let b = topology.push_node(Position::new(1.0, 0.0), 2.0);
        topology.begin_layer();
        let c = topology.push_node(Position::new(2.0, 0.0), 2.0);
        topology.connect(a, b).unwrap();
        topology.connect(b, c).unwrap();
        topology.nodes_mut()[0].activation_level = 1.0;

        let mut engine = SynapticPropagationEngine::new();
        engine.propagate(&mut topology, &params(1.0));
        assert_eq!(topology.nodes()[1].incoming_signal, 1.0);
        assert_eq!(topology.nodes()[2].incoming_signal, 0.0);
    }
}
