// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Node and connection records

use super::ids::{ConnectionId, NodeId};
use super::spatial::Position;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Directed, immutable edge between two nodes of the same topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Connection {
    pub id: ConnectionId,
    pub source: NodeId,
    pub target: NodeId,
}

/// A single node of the layered network
///
/// `position`, `layer_index`, `base_radius` and `outgoing` are fixed at build
/// time. `activation_level` and `incoming_signal` are the only fields the
/// simulator touches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    /// 0 = input layer
    pub layer_index: usize,
    pub base_radius: f32,
    /// Signal strength, >= 0, unbounded above
    pub activation_level: f32,
    /// Per-frame accumulator, rebuilt from scratch every tick
    pub incoming_signal: f32,
    pub outgoing: Vec<Connection>,
}

impl Node {
    pub fn new(id: NodeId, position: Position, layer_index: usize, base_radius: f32) -> Self {
        Self {
            id,
            position,
            layer_index,
            base_radius,
            activation_level: 0.0,
            incoming_signal: 0.0,
            outgoing: Vec::new(),
        }
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.layer_index == 0
    }

    /// Activation capped to [0, 1] for visual computations
    #[inline]
    pub fn visual_intensity(&self) -> f32 {
        crate::dynamics::visual_intensity(self.activation_level)
    }
}
