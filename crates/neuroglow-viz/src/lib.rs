// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroglow Visualization
//!
//! Turns node activation into pixels:
//! - [`color`]: CSS-style color parsing and channel interpolation
//! - [`visual_mapper`]: activation -> color, stroke width, glow, pulsed radius
//! - [`surface`]: the [`DrawingSurface`] seam the host implements
//! - [`render_pass`]: one frame of drawing (connections first, then nodes)
//! - [`recording`]: an in-memory surface that records commands and exports SVG

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod color;
pub mod recording;
pub mod render_pass;
pub mod surface;
pub mod visual_mapper;

pub use color::{lerp, resolve_color, ColorParseError, Rgba, NEUTRAL_FALLBACK};
pub use recording::{DrawCommand, RecordingSurface};
pub use render_pass::{render_frame, RenderStats};
pub use surface::{DrawingSurface, FillStyle, Glow, PathSegment, StrokeStyle};
pub use visual_mapper::{Palette, VisualMapper, CONNECTION_FADE_IN, LAYER_PHASE_STEP};
