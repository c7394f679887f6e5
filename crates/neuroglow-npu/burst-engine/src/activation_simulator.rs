// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Activation simulator: one discrete step = propagation, then state update.
//! The two phases never interleave.

use neuroglow_config::DynamicsConfig;
use neuroglow_npu_neural::{ActivationParameters, Topology};
use rand::Rng;
use serde::Serialize;

use crate::neural_dynamics::{update_node_states, DynamicsResult};
use crate::synaptic_propagation::{PropagationStats, SynapticPropagationEngine};

/// Statistics of one simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StepStats {
    pub propagation: PropagationStats,
    pub dynamics: DynamicsResult,
}

/// Activation model parameters from the `[dynamics]` section
pub fn activation_parameters(config: &DynamicsConfig) -> ActivationParameters {
    ActivationParameters {
        input_activation_probability: config.input_activation_probability,
        propagation_speed: config.propagation_speed,
        activation_threshold: config.activation_threshold,
        activation_boost: config.activation_boost,
        decay_rate: config.decay_rate,
        min_activation: config.min_activation,
    }
}

#[derive(Debug, Default)]
pub struct ActivationSimulator {
    params: ActivationParameters,
    propagation: SynapticPropagationEngine,
}

impl ActivationSimulator {
    pub fn new(params: ActivationParameters) -> Self {
        Self {
            params,
            propagation: SynapticPropagationEngine::new(),
        }
    }

    /// Takes effect from the next step
    pub fn set_parameters(&mut self, params: ActivationParameters) {
        self.params = params;
    }

    /// Advance every node by one tick
    pub fn step<R: Rng + ?Sized>(&mut self, topology: &mut Topology, rng: &mut R) -> StepStats {
        let propagation = self.propagation.propagate(topology, &self.params);
        let dynamics = update_node_states(topology, &self.params, rng);
        StepStats {
            propagation,
            dynamics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroglow_npu_neural::Position;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_two_node_scenario() {
        let mut topology = Topology::new(1);
        let source = topology.push_node(Position::new(0.0, 0.0), 2.0);
        topology.begin_layer();
        let target = topology.push_node(Position::new(10.0, 0.0), 2.0);
        topology.connect(source, target).unwrap();
        topology.nodes_mut()[0].activation_level = 1.0;

        let mut simulator = ActivationSimulator::new(ActivationParameters {
            input_activation_probability: 0.0,
            propagation_speed: 1.0,
            activation_threshold: 0.6,
            activation_boost: 1.5,
            ..Default::default()
        });
        let stats = simulator.step(&mut topology, &mut StepRng::new(0, 0));

        assert_eq!(topology.nodes()[1].incoming_signal, 1.0);
        assert!((topology.nodes()[1].activation_level - 2.6).abs() < 1e-5);
        assert_eq!(stats.propagation.contributions, 1);
        assert_eq!(stats.dynamics.threshold_firings, 1);
    }

    #[test]
    fn test_parameters_from_config() {
        let config = DynamicsConfig::default();
        assert_eq!(activation_parameters(&config), ActivationParameters::default());
    }
}
