// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Neuroglow Brain Development

Builds the layered node network the animation runs on:
- Neurogenesis (placing nodes in vertical bands with jitter and radius variance)
- Synaptogenesis (forward-only wiring to a random subset of the next layer)

A build consumes an injected random source, so a seeded generator yields the
same topology every time.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod connectivity;
pub mod neuroembryogenesis;
pub mod neurogenesis;
pub mod rng;
pub mod types;

pub use connectivity::{wire_forward_layers, SynaptogenesisStats};
pub use neuroembryogenesis::{develop_topology, DevelopmentParams};
pub use neurogenesis::{band_x, jitter, row_y, sample_radius, MIN_NODE_RADIUS};
pub use rng::rng_from_seed;
pub use types::{BduError, BduResult};
