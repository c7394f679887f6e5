// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Render Pass
//!
//! Draws one frame: clear, every connection, then every node, so nodes always
//! sit on top of the strokes that reach them.
//!
//! A connection takes its look from its source node. Sources dimmer than the
//! visibility cutoff skip all of their connections. Curved connections bend
//! through a control point pushed off the midpoint, perpendicular to the
//! segment, by `uniform(-0.5, 0.5) * curve_wobble * a`; the offset is redrawn
//! every frame, which gives active paths their shimmer.

use neuroglow_npu_neural::{visual_intensity, Topology};
use rand::Rng;
use serde::Serialize;
use tracing::trace;

use crate::surface::{DrawingSurface, FillStyle, PathSegment, StrokeStyle};
use crate::visual_mapper::VisualMapper;

/// Counts for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub connections_drawn: usize,
    pub connections_skipped: usize,
    pub nodes_drawn: usize,
}

/// Render `topology` onto `surface`
///
/// `time_secs` only drives the radius pulse phase.
pub fn render_frame<S, R>(
    surface: &mut S,
    topology: &Topology,
    mapper: &VisualMapper,
    time_secs: f64,
    rng: &mut R,
) -> RenderStats
where
    S: DrawingSurface + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = RenderStats::default();
    surface.clear();

    for node in topology.nodes() {
        let a = visual_intensity(node.activation_level);
        if a < mapper.visibility_cutoff {
            stats.connections_skipped += node.outgoing.len();
            continue;
        }

        let style = StrokeStyle {
            color: mapper.connection_color(a),
            width: mapper.stroke_width(a),
            glow: mapper.glow(a),
        };
        for connection in &node.outgoing {
            // Dangling targets cannot occur in a built topology
            let Ok(target) = topology.node(connection.target) else {
                stats.connections_skipped += 1;
                continue;
            };
            let from = node.position;
            let to = target.position;
            let path = if mapper.curved {
                let offset = (rng.gen::<f32>() - 0.5) * mapper.curve_wobble * a;
                PathSegment::Quadratic {
                    from,
                    control: from.midpoint(to).offset(from.normal_towards(to), offset),
                    to,
                }
            } else {
                PathSegment::Line { from, to }
            };
            surface.stroke_path(&path, &style);
            stats.connections_drawn += 1;
        }
    }

    for node in topology.nodes() {
        let a = visual_intensity(node.activation_level);
        let radius = mapper.node_radius(node.base_radius, node.layer_index, a, time_secs);
        let style = FillStyle {
            color: mapper.node_color(a),
            glow: mapper.glow(a),
        };
        surface.fill_circle(node.position, radius, &style);
        stats.nodes_drawn += 1;
    }

    trace!(
        "[VIZ] Frame drawn: {} connections ({} skipped), {} nodes",
        stats.connections_drawn,
        stats.connections_skipped,
        stats.nodes_drawn
    );
    stats
}
