// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Neuroembryogenesis - topology development from configuration.

Coordinates the two build stages:

1. **Neurogenesis**: placing nodes layer by layer, top to bottom
2. **Synaptogenesis**: forming forward connections between adjacent layers

Random draws happen in a fixed order (per node: x jitter, y jitter, radius;
then wiring), so a seeded generator reproduces the same topology.
*/

use neuroglow_config::NeuroglowConfig;
use neuroglow_npu_neural::{Position, Topology};
use rand::Rng;
use tracing::{debug, warn};

use crate::connectivity::wire_forward_layers;
use crate::neurogenesis::{band_x, jitter, row_y, sample_radius};
use crate::types::BduResult;

/// Everything a topology build depends on
#[derive(Debug, Clone, PartialEq)]
pub struct DevelopmentParams {
    pub layers: Vec<usize>,
    pub width: f32,
    pub height: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub position_jitter: f32,
    pub base_radius: f32,
    pub radius_variance: f32,
    pub max_connections_per_node: usize,
}

impl DevelopmentParams {
    /// Build parameters for a surface of `width` x `height`
    pub fn from_config(config: &NeuroglowConfig, width: f32, height: f32) -> Self {
        Self {
            layers: config.topology.layers.clone(),
            width,
            height,
            horizontal_spacing: config.topology.horizontal_spacing,
            vertical_spacing: config.topology.vertical_spacing,
            position_jitter: config.topology.position_jitter,
            base_radius: config.nodes.base_radius,
            radius_variance: config.nodes.radius_variance,
            max_connections_per_node: config.topology.max_connections_per_node,
        }
    }

    /// Whether the surface can hold a layout at all
    pub fn has_drawable_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Develop a complete topology
///
/// A surface without drawable area produces an empty topology. Zero-size
/// layers are skipped.
pub fn develop_topology<R: Rng + ?Sized>(
    params: &DevelopmentParams,
    generation: u64,
    rng: &mut R,
) -> BduResult<Topology> {
    let mut topology = Topology::new(generation);

    if !params.has_drawable_area() {
        warn!(
            "[TOPOLOGY] Surface {}x{} has no drawable area, building empty topology",
            params.width, params.height
        );
        return Ok(topology);
    }

    let layers: Vec<usize> = params.layers.iter().copied().filter(|&n| n > 0).collect();
    if layers.len() != params.layers.len() {
        warn!(
            "[TOPOLOGY] Skipping {} zero-size layer(s) in {:?}",
            params.layers.len() - layers.len(),
            params.layers
        );
    }

    // Neurogenesis
    for (layer, &size) in layers.iter().enumerate() {
        topology.begin_layer();
        let x = band_x(layer, layers.len(), params.width, params.horizontal_spacing);
        for row in 0..size {
            let y = row_y(row, size, params.height, params.vertical_spacing);
            let position = Position::new(
                x + jitter(rng, params.position_jitter),
                y + jitter(rng, params.position_jitter),
            );
            let radius = sample_radius(rng, params.base_radius, params.radius_variance);
            topology.push_node(position, radius);
        }
    }

    // Synaptogenesis
    let stats = wire_forward_layers(&mut topology, params.max_connections_per_node, rng)?;
    topology.validate()?;

    debug!(
        "[TOPOLOGY] Generation {}: {} nodes in {} layers, {} connections",
        generation,
        topology.node_count(),
        topology.layer_count(),
        stats.connections_created
    );

    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(layers: Vec<usize>) -> DevelopmentParams {
        DevelopmentParams {
            layers,
            ..DevelopmentParams::from_config(&NeuroglowConfig::default(), 800.0, 600.0)
        }
    }

    #[test]
    fn test_default_config_builds() {
        let mut rng = StdRng::seed_from_u64(42);
        let topology = develop_topology(&params(vec![4, 7, 7, 5, 3]), 1, &mut rng).unwrap();
        assert_eq!(topology.node_count(), 26);
        assert_eq!(topology.layer_sizes(), &[4, 7, 7, 5, 3]);
        assert_eq!(topology.generation(), 1);
        assert!(topology.validate().is_ok());
    }

    #[test]
    fn test_degenerate_surface_gives_empty_topology() {
        let mut rng = StdRng::seed_from_u64(1);
        for (w, h) in [(0.0, 600.0), (800.0, -1.0), (f32::NAN, 600.0), (f32::INFINITY, 10.0)] {
            let p = DevelopmentParams {
                width: w,
                height: h,
                ..params(vec![2, 2])
            };
            let topology = develop_topology(&p, 3, &mut rng).unwrap();
            assert!(topology.is_empty());
            assert_eq!(topology.connection_count(), 0);
            assert_eq!(topology.generation(), 3);
        }
    }

    #[test]
    fn test_zero_size_layers_skipped() {
        let mut rng = StdRng::seed_from_u64(1);
        let topology = develop_topology(&params(vec![2, 0, 3]), 1, &mut rng).unwrap();
        assert_eq!(topology.layer_sizes(), &[2, 3]);
        assert!(topology.validate().is_ok());
        assert!(topology.connection_count() > 0);
    }

    #[test]
    fn test_single_layer_centered_and_isolated() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = DevelopmentParams {
            position_jitter: 0.0,
            ..params(vec![1])
        };
        let topology = develop_topology(&p, 1, &mut rng).unwrap();
        let node = &topology.nodes()[0];
        assert_eq!(node.position, Position::new(400.0, 300.0));
        assert_eq!(topology.connection_count(), 0);
    }

    #[test]
    fn test_jitter_stays_within_half_magnitude() {
        let mut rng = StdRng::seed_from_u64(8);
        let p = DevelopmentParams {
            position_jitter: 10.0,
            ..params(vec![1, 1])
        };
        let topology = develop_topology(&p, 1, &mut rng).unwrap();
        let first = topology.nodes()[0].position;
        // 800 * 0.8 = 640 span starting at 80
        assert!((first.x - 80.0).abs() <= 5.0);
        assert!((first.y - 300.0).abs() <= 5.0);
    }
}
