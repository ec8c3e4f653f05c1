// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and edges.

use crate::edge::Edge;
use crate::node::{Node, NodeId, NodeKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A branching video graph.
///
/// Nodes are kept in insertion order (declaration order) and edges as a
/// plain ordered list. The export pipeline consumes a graph read-only;
/// only the authoring UI mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in declaration order
    nodes: IndexMap<NodeId, Node>,
    /// Edges in declaration order
    edges: Vec<Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph, returning its id
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, node_id: &NodeId) -> Option<Node> {
        self.edges.retain(|e| !e.involves_node(node_id));
        self.nodes.shift_remove(node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    /// Get all nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs in declaration order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Get nodes of a given kind, in declaration order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind() == kind)
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether a node id exists in the graph
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Add a directed edge between two existing nodes.
    ///
    /// Both endpoints must already exist; a dangling edge is a
    /// data-integrity defect and is rejected rather than silently kept.
    /// Duplicate edges between the same pair are allowed.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<(), EdgeError> {
        let edge = Edge::new(source.into(), target.into());
        if !self.contains(&edge.source) {
            return Err(EdgeError::DanglingEndpoint(edge.source));
        }
        if !self.contains(&edge.target) {
            return Err(EdgeError::DanglingEndpoint(edge.target));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Get all edges in declaration order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get edges originating at a node, in declaration order
    pub fn edges_from<'a>(&'a self, node_id: &'a NodeId) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.source == *node_id)
    }

    /// Get edges terminating at a node, in declaration order
    pub fn edges_to<'a>(&'a self, node_id: &'a NodeId) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.target == *node_id)
    }
}

/// Error when adding an edge
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    /// An endpoint references a node id absent from the graph
    #[error("Edge endpoint references unknown node: {0}")]
    DanglingEndpoint(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::VideoData;
    use std::path::PathBuf;

    fn video_node(id: &str) -> Node {
        Node::video(VideoData {
            file_path: PathBuf::from(format!("/media/{id}.mp4")),
            file_name: format!("{id}.mp4"),
            file_size: 0,
        })
        .with_id(id)
    }

    #[test]
    fn add_edge_rejects_dangling_endpoints() {
        let mut graph = Graph::new();
        graph.add_node(video_node("a"));

        assert!(graph.add_edge("a", "missing").is_err());
        assert!(graph.add_edge("missing", "a").is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let mut graph = Graph::new();
        graph.add_node(video_node("a"));
        graph.add_node(video_node("b"));

        graph.add_edge("a", "b").unwrap();
        graph.add_edge("a", "b").unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut graph = Graph::new();
        graph.add_node(video_node("a"));
        graph.add_node(video_node("b"));
        graph.add_node(video_node("c"));
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("b", "c").unwrap();
        graph.add_edge("a", "c").unwrap();

        graph.remove_node(&NodeId::from("b"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0], Edge::new("a", "c"));
    }

    #[test]
    fn node_mut_edits_a_node_in_place() {
        let mut graph = Graph::new();
        graph.add_node(Node::text("draft label").with_id("t"));

        let node = graph.node_mut(&NodeId::from("t")).unwrap();
        if let crate::node::NodeContent::Text(data) = &mut node.content {
            data.label = "final label".to_owned();
        }
        node.position = [12.0, 34.0];

        let node = graph.node(&NodeId::from("t")).unwrap();
        assert_eq!(node.text_data().unwrap().label, "final label");
        assert_eq!(node.position, [12.0, 34.0]);
    }

    #[test]
    fn nodes_iterate_in_declaration_order() {
        let mut graph = Graph::new();
        for id in ["z", "m", "a"] {
            graph.add_node(video_node(id));
        }
        let ids: Vec<&str> = graph.node_ids().map(NodeId::as_str).collect();
        assert_eq!(ids, ["z", "m", "a"]);
    }
}
