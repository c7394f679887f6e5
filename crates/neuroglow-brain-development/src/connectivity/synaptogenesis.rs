// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Forward synaptogenesis.

Each node of layer `i` connects to `min(max_connections_per_node, n_{i+1})`
distinct nodes of layer `i + 1`, chosen by shuffling the next layer and taking
a prefix. There is no weighting and no guarantee that every target receives an
input. Nodes of the last layer stay without outgoing connections.
*/

use neuroglow_npu_neural::{NodeId, Topology};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::types::BduResult;

/// Outcome of a wiring pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynaptogenesisStats {
    pub sources_wired: usize,
    pub connections_created: usize,
}

/// Wire every layer to the next one
///
/// Nodes are visited in id order, so connection ids follow source order.
pub fn wire_forward_layers<R: Rng + ?Sized>(
    topology: &mut Topology,
    max_connections_per_node: usize,
    rng: &mut R,
) -> BduResult<SynaptogenesisStats> {
    let mut stats = SynaptogenesisStats::default();
    if max_connections_per_node == 0 {
        return Ok(stats);
    }

    for layer in 0..topology.layer_count().saturating_sub(1) {
        let sources: Vec<NodeId> = topology.layer(layer)?.iter().map(|n| n.id).collect();
        let mut targets: Vec<NodeId> = topology.layer(layer + 1)?.iter().map(|n| n.id).collect();
        let fan_out = max_connections_per_node.min(targets.len());

        for source in sources {
            targets.shuffle(rng);
            for &target in &targets[..fan_out] {
                topology.connect(source, target)?;
                stats.connections_created += 1;
            }
            stats.sources_wired += 1;
        }

        trace!(
            "[TOPOLOGY] Wired layer {} -> {} with fan-out {}",
            layer,
            layer + 1,
            fan_out
        );
    }

    Ok(stats)
}
