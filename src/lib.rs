// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroglow - animated signal flow through a layered node network
//!
//! Neuroglow places nodes in vertical layers, wires each node forward to a
//! few random nodes of the next layer, and animates activation spreading from
//! the input layer. Every frame is drawn as glowing circles and curved
//! connections onto a host-supplied drawing surface.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neuroglow = "0.0.1-beta.18"
//! ```
//!
//! ## Feature Flags
//!
//! - **`std`** (default): TOML configuration loading
//! - **`file-logging`**: timestamped JSON log files with retention cleanup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroglow::prelude::*;
//!
//! let config = NeuroglowConfig::default();
//! let driver = ManualFrameScheduler::new();
//! let mut engine = FrameLoopRunner::new(
//!     config,
//!     Box::new(driver.clone()),
//!     Box::new(ManualResizeNotifier::new()),
//! )
//! .with_surface(RecordingSurface::new(800.0, 600.0));
//!
//! engine.start()?;
//! let mut now = 0.0;
//! while let Some(handle) = driver.take_pending() {
//!     let stats = engine.on_frame(handle, now);
//!     now += 1.0 / 60.0;
//!     if stats.map_or(true, |s| s.tick >= 120) {
//!         break;
//!     }
//! }
//! engine.stop();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neuroglow-npu-neural, neuroglow-config     │
//! │  (Node, Connection, Topology, activation rules)         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: brain-development, viz                     │
//! │  (Placement + wiring, visual mapping, render pass)      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Runtime: neuroglow-npu-burst-engine                    │
//! │  (Frame loop, propagation, dynamics, config updates)    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use neuroglow_config as config;
pub use neuroglow_npu_neural as neural;

// Re-export infrastructure
pub use neuroglow_observability as observability;

// Re-export algorithms
pub use neuroglow_brain_development as brain_development;
pub use neuroglow_viz as viz;

// Re-export runtime
pub use neuroglow_npu_burst_engine as burst_engine;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::neural::{Connection, ConnectionId, Node, NodeId, Position, Topology};

    pub use crate::config::{ConfigPatch, NeuroglowConfig};

    pub use crate::burst_engine::{
        ConfigUpdateReport, EngineState, FrameLoopRunner, FrameScheduler, FrameStats,
        LifecycleError, ManualFrameScheduler, ManualResizeNotifier, ResizeEvent, ResizeNotifier,
        TickHandle,
    };

    pub use crate::viz::{DrawingSurface, RecordingSurface, Rgba, VisualMapper};
}
