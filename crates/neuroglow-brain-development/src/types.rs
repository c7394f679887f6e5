// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for topology development.
*/

use neuroglow_npu_neural::NeuralError;

/// Result type for development operations
pub type BduResult<T> = Result<T, BduError>;

/// Errors that can occur while developing a topology
#[derive(Debug, thiserror::Error)]
pub enum BduError {
    #[error("Topology error: {0}")]
    Neural(#[from] NeuralError),
}
