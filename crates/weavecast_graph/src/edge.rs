// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions for the branching video graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// A directed edge between two nodes.
///
/// Edges carry no payload beyond their endpoints. Duplicate edges between
/// the same pair are tolerated and never deduplicated; their declaration
/// order in the graph is significant for playback routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
}

impl Edge {
    /// Create a new edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Check if this edge involves a specific node
    pub fn involves_node(&self, node_id: &NodeId) -> bool {
        self.source == *node_id || self.target == *node_id
    }
}
