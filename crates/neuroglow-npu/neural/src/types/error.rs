// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for node network operations

use super::ids::NodeId;

/// Error types for topology construction and lookup
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid layer index {index} (topology has {layer_count} layers)")]
    InvalidLayer { index: usize, layer_count: usize },

    #[error("Connection {source_id} -> {target} is not strictly forward (layers {source_layer} -> {target_layer})")]
    NotForward {
        source_id: NodeId,
        target: NodeId,
        source_layer: usize,
        target_layer: usize,
    },

    #[error("Node id {actual} does not match arena index {expected}")]
    IdMismatch { expected: usize, actual: NodeId },
}

pub type Result<T> = core::result::Result<T, NeuralError>;
