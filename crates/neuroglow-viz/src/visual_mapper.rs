// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Visual Mapper
//!
//! Pure mapping from a node's activation to what gets drawn. Every method
//! clamps the raw activation to `a ∈ [0, 1]` first:
//!
//! | output            | at `a = 0`             | at `a = 1`            |
//! |-------------------|------------------------|-----------------------|
//! | node color        | node dim color         | node active color     |
//! | connection color  | connection dim color   | last palette stop     |
//! | stroke width      | `base_width`           | `active_width`        |
//! | glow blur         | 0                      | `glow.blur`           |
//!
//! Color strings are parsed once in [`VisualMapper::from_config`] and cached.

use neuroglow_config::NeuroglowConfig;
use neuroglow_npu_neural::visual_intensity;
use tracing::{debug, warn};

use crate::color::{lerp, resolve_color, Rgba};
use crate::surface::Glow;

/// Pulse phase offset between consecutive layers (radians)
pub const LAYER_PHASE_STEP: f32 = 0.5;

/// Below this intensity connection colors fade in from the dim color
pub const CONNECTION_FADE_IN: f32 = 0.1;

/// Single stop used when no configured palette entry is usable
pub const FALLBACK_PALETTE_STOP: Rgba = Rgba::new(200.0, 240.0, 255.0, 0.9);

/// Ordered color stops, dimmest first; never empty
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    stops: Vec<Rgba>,
}

impl Palette {
    /// Parse palette entries, dropping unusable ones
    ///
    /// An empty result is replaced by a single [`FALLBACK_PALETTE_STOP`].
    pub fn from_strings(entries: &[String]) -> Self {
        let mut stops = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.parse::<Rgba>() {
                Ok(color) => stops.push(color),
                Err(e) => warn!("[VIZ] Dropping palette entry '{}': {}", entry, e),
            }
        }
        if stops.is_empty() {
            warn!("[VIZ] Connection palette has no usable entries, using single-entry fallback");
            stops.push(FALLBACK_PALETTE_STOP);
        }
        Self { stops }
    }

    pub fn stops(&self) -> &[Rgba] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Piecewise interpolation across the stops at clamped intensity `a`
    ///
    /// NaN samples the first stop.
    pub fn sample(&self, a: f32) -> Rgba {
        let last = self.stops.len().saturating_sub(1);
        let scaled = visual_intensity(a) * last as f32;
        let i = (scaled.floor() as usize).min(last);
        let f = scaled - i as f32;
        self.stops[i].lerp(self.stops[(i + 1).min(last)], f)
    }
}

/// Resolved drawing style for one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct VisualMapper {
    pub node_dim: Rgba,
    pub node_active: Rgba,
    pub connection_dim: Rgba,
    pub palette: Palette,
    pub base_width: f32,
    pub active_width: f32,
    pub max_glow: f32,
    pub glow_color: Rgba,
    pub pulse_magnitude: f32,
    pub pulse_speed: f32,
    pub curved: bool,
    pub curve_wobble: f32,
    pub visibility_cutoff: f32,
}

impl VisualMapper {
    pub fn from_config(config: &NeuroglowConfig) -> Self {
        let mapper = Self {
            node_dim: resolve_color(&config.nodes.dim_color, "nodes.dim_color"),
            node_active: resolve_color(&config.nodes.active_color, "nodes.active_color"),
            connection_dim: resolve_color(&config.connections.dim_color, "connections.dim_color"),
            palette: Palette::from_strings(&config.connections.active_palette),
            base_width: config.connections.base_width,
            active_width: config.connections.active_width,
            max_glow: config.glow.blur,
            glow_color: resolve_color(&config.glow.color, "glow.color"),
            pulse_magnitude: config.nodes.pulse_magnitude,
            pulse_speed: config.nodes.pulse_speed,
            curved: config.connections.curved,
            curve_wobble: config.connections.curve_wobble,
            visibility_cutoff: config.connections.visibility_cutoff,
        };
        debug!(
            "[VIZ] Resolved visual style ({} palette stops)",
            mapper.palette.len()
        );
        mapper
    }

    pub fn node_color(&self, activation: f32) -> Rgba {
        self.node_dim.lerp(self.node_active, visual_intensity(activation))
    }

    pub fn connection_color(&self, activation: f32) -> Rgba {
        let a = visual_intensity(activation);
        let color = self.palette.sample(a);
        if a < CONNECTION_FADE_IN {
            self.connection_dim.lerp(color, a / CONNECTION_FADE_IN)
        } else {
            color
        }
    }

    pub fn stroke_width(&self, activation: f32) -> f32 {
        lerp(self.base_width, self.active_width, visual_intensity(activation))
    }

    pub fn glow_blur(&self, activation: f32) -> f32 {
        lerp(0.0, self.max_glow, visual_intensity(activation))
    }

    /// Glow for a shape at `activation`; `None` when there is nothing to blur
    pub fn glow(&self, activation: f32) -> Option<Glow> {
        let blur = self.glow_blur(activation);
        (blur > 0.0).then_some(Glow {
            blur,
            color: self.glow_color,
        })
    }

    /// Breathing radius, floored at 0
    ///
    /// Layers pulse out of phase by [`LAYER_PHASE_STEP`].
    pub fn node_radius(&self, base_radius: f32, layer_index: usize, activation: f32, time_secs: f64) -> f32 {
        let phase = (time_secs * self.pulse_speed as f64) as f32 + layer_index as f32 * LAYER_PHASE_STEP;
        let pulse = phase.sin() * self.pulse_magnitude * visual_intensity(activation);
        (base_radius + pulse).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> VisualMapper {
        VisualMapper::from_config(&NeuroglowConfig::default())
    }

    #[test]
    fn test_zero_activation_boundary() {
        let m = mapper();
        assert_eq!(m.node_color(0.0), m.node_dim);
        assert_eq!(m.connection_color(0.0), m.connection_dim);
        assert_eq!(m.stroke_width(0.0), m.base_width);
        assert_eq!(m.glow_blur(0.0), 0.0);
        assert!(m.glow(0.0).is_none());
    }

    #[test]
    fn test_full_activation_boundary() {
        let m = mapper();
        let last = *m.palette.stops().last().unwrap();
        assert_eq!(m.node_color(1.0), m.node_active);
        assert_eq!(m.connection_color(1.0), last);
        assert_eq!(m.stroke_width(1.0), m.active_width);
        assert_eq!(m.glow_blur(1.0), m.max_glow);
    }

    #[test]
    fn test_activation_clamped_for_visuals() {
        let m = mapper();
        assert_eq!(m.node_color(7.5), m.node_color(1.0));
        assert_eq!(m.stroke_width(-3.0), m.base_width);
        assert_eq!(m.connection_color(f32::NAN), m.connection_dim);
    }

    #[test]
    fn test_palette_interpolates_between_stops() {
        let palette = Palette::from_strings(&["#000000".to_string(), "#ffffff".to_string(), "#ff0000".to_string()]);
        assert_eq!(palette.sample(0.5), Rgba::new(255.0, 255.0, 255.0, 1.0));
        assert_eq!(palette.sample(0.25), Rgba::new(127.5, 127.5, 127.5, 1.0));
        assert_eq!(palette.sample(1.0), Rgba::new(255.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_palette_sample_nan_is_first_stop() {
        let palette = Palette::from_strings(&["#000000".to_string(), "#ffffff".to_string()]);
        let color = palette.sample(f32::NAN);
        assert_eq!(color, Rgba::new(0.0, 0.0, 0.0, 1.0));
        assert!(!color.r.is_nan() && !color.a.is_nan());
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut config = NeuroglowConfig::default();
        config.connections.active_palette.clear();
        let m = VisualMapper::from_config(&config);
        assert_eq!(m.palette.stops(), &[FALLBACK_PALETTE_STOP]);
        assert_eq!(m.connection_color(1.0), FALLBACK_PALETTE_STOP);
        assert_eq!(m.connection_color(0.5), FALLBACK_PALETTE_STOP);
    }

    #[test]
    fn test_malformed_palette_falls_back() {
        let palette = Palette::from_strings(&["nope".to_string(), "rgb(1,2)".to_string()]);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.sample(0.3), FALLBACK_PALETTE_STOP);

        let partial = Palette::from_strings(&["nope".to_string(), "#010203".to_string()]);
        assert_eq!(partial.stops(), &[Rgba::new(1.0, 2.0, 3.0, 1.0)]);
    }

    #[test]
    fn test_fade_in_below_cutoff() {
        let m = mapper();
        let faded = m.connection_color(0.05);
        let target = m.palette.sample(0.05);
        assert_eq!(faded, m.connection_dim.lerp(target, 0.5));
    }

    #[test]
    fn test_radius_pulse() {
        let m = mapper();
        // No activation, no pulse
        assert_eq!(m.node_radius(3.0, 2, 0.0, 12.3), 3.0);
        // sin(0) == 0 at layer 0, time 0
        assert_eq!(m.node_radius(3.0, 0, 1.0, 0.0), 3.0);
        // Large negative swing floors at zero
        let mut big = m.clone();
        big.pulse_magnitude = 100.0;
        let r = big.node_radius(1.0, 0, 1.0, (-std::f64::consts::FRAC_PI_2) / big.pulse_speed as f64);
        assert_eq!(r, 0.0);
    }
}
