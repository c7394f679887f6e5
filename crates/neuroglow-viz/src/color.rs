// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! RGBA colors
//!
//! Accepted notations: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
//! `rgba(r, g, b, a)`. Color channels are kept as `f32` in `[0, 255]`, alpha
//! in `[0, 1]`, so interpolation does not accumulate rounding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Substitute for colors that fail to parse
pub const NEUTRAL_FALLBACK: Rgba = Rgba::new(128.0, 128.0, 128.0, 1.0);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    #[error("invalid color function '{0}'")]
    InvalidFunction(String),

    #[error("unsupported color notation '{0}'")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels forced into range (RGB to `[0, 255]`, alpha to `[0, 1]`)
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 255.0),
            g: self.g.clamp(0.0, 255.0),
            b: self.b.clamp(0.0, 255.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Per-channel interpolation towards `other`, clamped afterwards
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
        .clamped()
    }

    /// CSS `rgba()` notation with integer color channels
    pub fn to_css(&self) -> String {
        let c = self.clamped();
        format!(
            "rgba({}, {}, {}, {})",
            c.r.round() as u8,
            c.g.round() as u8,
            c.b.round() as u8,
            (c.a * 1000.0).round() / 1000.0
        )
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(format!("#{}", hex));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map(f32::from).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let digit = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17.0);
                Ok(Rgba::new(digit(0)?, digit(1)?, digit(2)?, 1.0))
            }
            6 | 8 => {
                let alpha = if hex.len() == 8 {
                    byte(&hex[6..8])? / 255.0
                } else {
                    1.0
                };
                Ok(Rgba::new(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?, alpha))
            }
            _ => Err(invalid()),
        }
    }

    fn parse_function(text: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidFunction(text.to_string());
        let (args, expected) = if let Some(rest) = text.strip_prefix("rgba(") {
            (rest, 4)
        } else if let Some(rest) = text.strip_prefix("rgb(") {
            (rest, 3)
        } else {
            return Err(ColorParseError::Unsupported(text.to_string()));
        };
        let args = args.strip_suffix(')').ok_or_else(invalid)?;

        let values = args
            .split(',')
            .map(|part| part.trim().parse::<f32>().map_err(|_| invalid()))
            .collect::<Result<Vec<f32>, _>>()?;
        if values.len() != expected || values.iter().any(|v| !v.is_finite()) {
            return Err(invalid());
        }

        let alpha = values.get(3).copied().unwrap_or(1.0);
        Ok(Rgba::new(values[0], values[1], values[2], alpha).clamped())
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        if text.is_empty() {
            return Err(ColorParseError::Empty);
        }
        match text.strip_prefix('#') {
            Some(hex) => Rgba::parse_hex(hex),
            None => Rgba::parse_function(&text),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// `x·(1−t) + y·t`, exact at both ends
pub fn lerp(x: f32, y: f32, t: f32) -> f32 {
    x * (1.0 - t) + y * t
}

/// Parse a configured color, falling back to [`NEUTRAL_FALLBACK`]
pub fn resolve_color(text: &str, field: &str) -> Rgba {
    text.parse().unwrap_or_else(|e: ColorParseError| {
        warn!("[VIZ] {} '{}' unusable ({}), using neutral fallback", field, text, e);
        NEUTRAL_FALLBACK
    })
}
