// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spatial types (surface coordinates in logical pixels)

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// 2D position on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between two positions
    pub fn midpoint(self, other: Position) -> Position {
        Position::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit normal of the segment `self -> other` (zero for a degenerate segment)
    pub fn normal_towards(self, other: Position) -> Position {
        let len = self.distance(other);
        if len <= f32::EPSILON {
            return Position::default();
        }
        Position::new(-(other.y - self.y) / len, (other.x - self.x) / len)
    }

    pub fn offset(self, direction: Position, amount: f32) -> Position {
        Position::new(self.x + direction.x * amount, self.y + direction.y * amount)
    }
}
