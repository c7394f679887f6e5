// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroglow Burst Engine
//!
//! Drives the animation one tick at a time:
//! 1. Drain queued configuration updates
//! 2. Phase 1: propagate signal from active nodes ([`synaptic_propagation`])
//! 3. Phase 2: decay, trigger and clamp every node ([`neural_dynamics`])
//! 4. Render through the visual mapper
//! 5. Request the next tick
//!
//! Everything lives in one [`FrameLoopRunner`]; there is no global state, so
//! any number of engines can run side by side.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activation_simulator;
pub mod frame_loop_runner;
pub mod neural_dynamics;
pub mod parameter_update_queue;
pub mod scheduler;
pub mod synaptic_propagation;

pub use activation_simulator::{activation_parameters, ActivationSimulator, StepStats};
pub use frame_loop_runner::{ConfigUpdateReport, EngineState, FrameLoopRunner, FrameStats, LifecycleError};
pub use neural_dynamics::{update_node_states, DynamicsResult};
pub use parameter_update_queue::ParameterUpdateQueue;
pub use scheduler::{
    FrameScheduler, ManualFrameScheduler, ManualResizeNotifier, ResizeEvent, ResizeNotifier,
    SubscriptionId, TickHandle,
};
pub use synaptic_propagation::{PropagationStats, SynapticPropagationEngine};
