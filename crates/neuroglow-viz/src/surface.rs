// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Drawing surface abstraction
//!
//! The host owns the real canvas; the renderer only sees this trait. Styles
//! are plain values so a surface can record or forward them unchanged.

use neuroglow_npu_neural::Position;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Blurred shadow drawn under a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: Rgba,
    pub glow: Option<Glow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    pub glow: Option<Glow>,
}

/// One stroked path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PathSegment {
    Line {
        from: Position,
        to: Position,
    },
    Quadratic {
        from: Position,
        control: Position,
        to: Position,
    },
}

impl PathSegment {
    pub fn endpoints(&self) -> (Position, Position) {
        match *self {
            PathSegment::Line { from, to } => (from, to),
            PathSegment::Quadratic { from, to, .. } => (from, to),
        }
    }
}

/// Host drawing surface
pub trait DrawingSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Match the backing store to new dimensions
    fn resize(&mut self, width: f32, height: f32);

    fn clear(&mut self);
    fn fill_circle(&mut self, center: Position, radius: f32, style: &FillStyle);
    fn stroke_path(&mut self, path: &PathSegment, style: &StrokeStyle);

    /// Whether the surface can be drawn on at all
    fn is_valid(&self) -> bool {
        self.width().is_finite() && self.height().is_finite()
    }
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for Box<S> {
    fn width(&self) -> f32 {
        (**self).width()
    }

    fn height(&self) -> f32 {
        (**self).height()
    }

    fn resize(&mut self, width: f32, height: f32) {
        (**self).resize(width, height)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn fill_circle(&mut self, center: Position, radius: f32, style: &FillStyle) {
        (**self).fill_circle(center, radius, style)
    }

    fn stroke_path(&mut self, path: &PathSegment, style: &StrokeStyle) {
        (**self).stroke_path(path, style)
    }

    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}
