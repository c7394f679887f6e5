// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Topology Arena
//!
//! Nodes live in one dense `Vec`, laid out layer by layer. A `NodeId` is the
//! node's index, so neighbour resolution is a bounds-checked array access and
//! tearing a topology down is dropping one allocation.
//!
//! A topology is built once and replaced wholesale; nothing here supports
//! removing nodes or connections.

use super::error::{NeuralError, Result};
use super::ids::{ConnectionId, NodeId};
use super::node::{Connection, Node};
use super::spatial::Position;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Topology {
    generation: u64,
    layer_sizes: Vec<usize>,
    /// Start index of every layer in `nodes`
    layer_offsets: Vec<usize>,
    nodes: Vec<Node>,
    connection_count: usize,
}

impl Topology {
    /// Empty topology for the given build generation
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Open a new layer; subsequent `push_node` calls land in it
    pub fn begin_layer(&mut self) -> usize {
        self.layer_offsets.push(self.nodes.len());
        self.layer_sizes.push(0);
        self.layer_sizes.len() - 1
    }

    /// Append a node to the most recently opened layer
    ///
    /// Opens layer 0 implicitly if no layer exists yet.
    pub fn push_node(&mut self, position: Position, base_radius: f32) -> NodeId {
        if self.layer_sizes.is_empty() {
            self.begin_layer();
        }
        let layer_index = self.layer_sizes.len() - 1;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, position, layer_index, base_radius));
        self.layer_sizes[layer_index] += 1;
        id
    }

    /// Create a forward connection `source -> target`
    ///
    /// Rejects anything that is not exactly one layer forward.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Result<ConnectionId> {
        let source_layer = self.node(source)?.layer_index;
        let target_layer = self.node(target)?.layer_index;
        if target_layer != source_layer + 1 {
            return Err(NeuralError::NotForward {
                source_id: source,
                target,
                source_layer,
                target_layer,
            });
        }

        let id = ConnectionId(self.connection_count as u32);
        self.connection_count += 1;
        self.nodes[source.index()]
            .outgoing
            .push(Connection { id, source, target });
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).ok_or(NeuralError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or(NeuralError::NodeNotFound(id))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Nodes of one layer, in vertical order
    pub fn layer(&self, index: usize) -> Result<&[Node]> {
        let start = *self
            .layer_offsets
            .get(index)
            .ok_or(NeuralError::InvalidLayer {
                index,
                layer_count: self.layer_sizes.len(),
            })?;
        Ok(&self.nodes[start..start + self.layer_sizes[index]])
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All connections in id order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.nodes.iter().flat_map(|n| n.outgoing.iter())
    }

    pub fn total_activation(&self) -> f32 {
        self.nodes.iter().map(|n| n.activation_level).sum()
    }

    /// Check the structural invariants of the arena
    ///
    /// Ids match indices and every connection goes exactly one layer forward.
    pub fn validate(&self) -> Result<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.index() != index {
                return Err(NeuralError::IdMismatch {
                    expected: index,
                    actual: node.id,
                });
            }
            for connection in &node.outgoing {
                let target = self.node(connection.target)?;
                if target.layer_index != node.layer_index + 1 {
                    return Err(NeuralError::NotForward {
                        source_id: connection.source,
                        target: connection.target,
                        source_layer: node.layer_index,
                        target_layer: target.layer_index,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_layer() -> Topology {
        let mut topology = Topology::new(1);
        topology.begin_layer();
        topology.push_node(Position::new(0.0, 0.0), 2.0);
        topology.push_node(Position::new(0.0, 10.0), 2.0);
        topology.begin_layer();
        topology.push_node(Position::new(10.0, 5.0), 2.0);
        topology
    }

    #[test]
    fn test_ids_follow_arena_order() {
        let topology = two_layer();
        assert_eq!(topology.layer_sizes(), &[2, 1]);
        assert_eq!(topology.node(NodeId(2)).unwrap().layer_index, 1);
        assert_eq!(topology.layer(1).unwrap()[0].id, NodeId(2));
        assert!(topology.validate().is_ok());
    }

    #[test]
    fn test_connect_forward_only() {
        let mut topology = two_layer();
        let c0 = topology.connect(NodeId(0), NodeId(2)).unwrap();
        let c1 = topology.connect(NodeId(1), NodeId(2)).unwrap();
        assert_eq!((c0, c1), (ConnectionId(0), ConnectionId(1)));
        assert_eq!(topology.connection_count(), 2);

        let err = topology.connect(NodeId(0), NodeId(1)).unwrap_err();
        assert!(matches!(err, NeuralError::NotForward { .. }));
        let err = topology.connect(NodeId(2), NodeId(0)).unwrap_err();
        assert!(matches!(err, NeuralError::NotForward { .. }));
    }

    #[test]
    fn test_missing_node_and_layer() {
        let topology = two_layer();
        assert_eq!(
            topology.node(NodeId(9)).unwrap_err(),
            NeuralError::NodeNotFound(NodeId(9))
        );
        assert!(topology.layer(5).is_err());
    }
}
