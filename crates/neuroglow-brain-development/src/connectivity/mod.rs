// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connectivity and synaptogenesis operations.
*/

pub mod synaptogenesis;

pub use synaptogenesis::{wire_forward_layers, SynaptogenesisStats};
