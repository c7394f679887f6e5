// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Node Network Types
//!
//! Core type definitions shared by the topology builder, the activation
//! simulator and the render pass.

pub mod error;
pub mod ids;
pub mod node;
pub mod spatial;
pub mod topology;

pub use error::{NeuralError, Result};
pub use ids::{ConnectionId, NodeId};
pub use node::{Connection, Node};
pub use spatial::Position;
pub use topology::Topology;
