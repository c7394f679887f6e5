// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Neurogenesis - node placement.

Layers occupy vertical bands spread evenly across `width * horizontal_spacing`,
centered on the surface. Within a band, nodes are spread evenly across
`height * vertical_spacing`, also centered. Every coordinate then receives an
independent uniform jitter.
*/

use rand::Rng;

/// Smallest radius a node can be created with
pub const MIN_NODE_RADIUS: f32 = 1.0;

/// Horizontal center of band `layer` out of `layer_count`
///
/// A single band sits at the horizontal center.
pub fn band_x(layer: usize, layer_count: usize, width: f32, horizontal_spacing: f32) -> f32 {
    if layer_count <= 1 {
        return width / 2.0;
    }
    let span = width * horizontal_spacing;
    let start = (width - span) / 2.0;
    start + span * layer as f32 / (layer_count - 1) as f32
}

/// Vertical position of row `row` in a band holding `row_count` nodes
///
/// A band with a single node centers it vertically.
pub fn row_y(row: usize, row_count: usize, height: f32, vertical_spacing: f32) -> f32 {
    if row_count <= 1 {
        return height / 2.0;
    }
    let span = height * vertical_spacing;
    let start = (height - span) / 2.0;
    start + span * row as f32 / (row_count - 1) as f32
}

/// Uniform draw in `[-magnitude/2, magnitude/2)`
///
/// A non-positive magnitude yields 0 without consuming randomness.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, magnitude: f32) -> f32 {
    if magnitude <= 0.0 {
        return 0.0;
    }
    (rng.gen::<f32>() - 0.5) * magnitude
}

/// `max(1, base + uniform(-variance, variance))`
pub fn sample_radius<R: Rng + ?Sized>(rng: &mut R, base: f32, variance: f32) -> f32 {
    let offset = (rng.gen::<f32>() * 2.0 - 1.0) * variance;
    (base + offset).max(MIN_NODE_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bands_are_centered() {
        // 800 * 0.5 = 400 span starting at 200
        assert_eq!(band_x(0, 3, 800.0, 0.5), 200.0);
        assert_eq!(band_x(1, 3, 800.0, 0.5), 400.0);
        assert_eq!(band_x(2, 3, 800.0, 0.5), 600.0);
    }

    #[test]
    fn test_single_band_and_single_row_center() {
        assert_eq!(band_x(0, 1, 640.0, 0.8), 320.0);
        assert_eq!(row_y(0, 1, 480.0, 0.7), 240.0);
    }

    #[test]
    fn test_rows_span_vertical_fraction() {
        assert_eq!(row_y(0, 2, 100.0, 0.5), 25.0);
        assert_eq!(row_y(1, 2, 100.0, 0.5), 75.0);
    }

    #[test]
    fn test_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let j = jitter(&mut rng, 12.0);
            assert!((-6.0..6.0).contains(&j), "jitter {} out of range", j);
        }
        assert_eq!(jitter(&mut rng, 0.0), 0.0);
        assert_eq!(jitter(&mut rng, -4.0), 0.0);
    }

    #[test]
    fn test_radius_floor() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let r = sample_radius(&mut rng, 0.5, 2.0);
            assert!(r >= MIN_NODE_RADIUS);
        }
        for _ in 0..1000 {
            let r = sample_radius(&mut rng, 3.0, 1.0);
            assert!((2.0..=4.0).contains(&r));
        }
    }
}
