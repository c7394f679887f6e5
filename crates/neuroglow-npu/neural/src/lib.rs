// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neuroglow Node Network (Platform-Agnostic)
//!
//! Everything the simulation and the renderer agree on:
//! - **Types**: node/connection identities, positions, the topology arena
//! - **Dynamics**: the per-node activation rules (decay, boost, clamping)
//!
//! No randomness and no drawing lives here. Builders and engines take this
//! crate's types and mutate them through the rules in [`dynamics`].

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod dynamics;
pub mod types;

pub use dynamics::*;

pub use types::{
    Connection, ConnectionId, NeuralError, Node, NodeId, Position, Result, Topology,
};
