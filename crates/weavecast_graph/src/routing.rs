// SPDX-License-Identifier: MIT OR Apache-2.0
//! Entry resolution and playback routing.
//!
//! These are pure functions of the graph. The synthesized player mirrors
//! the same rules in its client script so exported artifacts branch
//! exactly like the editor predicts.

use crate::graph::Graph;
use crate::node::{NodeId, NodeKind};

/// Find the node playback starts at.
///
/// Returns the first video node in declaration order that never appears as
/// an edge target. When every video node has an incoming edge the first
/// video node wins (first-in-declaration-order is the documented tiebreak,
/// see [`entry_candidates`]). Returns `None` when the graph has no video
/// node at all - a fatal precondition for export.
pub fn find_entry(graph: &Graph) -> Option<&NodeId> {
    graph
        .nodes_of_kind(NodeKind::Video)
        .find(|n| graph.edges_to(&n.id).next().is_none())
        .or_else(|| graph.nodes_of_kind(NodeKind::Video).next())
        .map(|n| &n.id)
}

/// All entry-eligible video nodes (no incoming edges), in declaration order.
///
/// More than one candidate means the author's start node is picked
/// arbitrarily by declaration order; surfacing the full set lets tooling
/// warn about the ambiguity without changing playback behavior.
pub fn entry_candidates(graph: &Graph) -> Vec<&NodeId> {
    graph
        .nodes_of_kind(NodeKind::Video)
        .filter(|n| graph.edges_to(&n.id).next().is_none())
        .map(|n| &n.id)
        .collect()
}

/// Outgoing-edge targets of a node, in edge-declaration order.
///
/// No dedup and no cycle detection - callers own termination.
pub fn downstream_of<'a>(graph: &'a Graph, node_id: &'a NodeId) -> Vec<&'a NodeId> {
    graph.edges_from(node_id).map(|e| &e.target).collect()
}

/// What playback does after a node's downstream set is inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// Present these text nodes as clickable options, in order
    Options(Vec<NodeId>),
    /// Immediately advance to this video node, no interaction
    Advance(NodeId),
    /// Nothing downstream - playback ends
    End,
}

/// Apply the branching rule to a downstream set.
///
/// Text nodes anywhere in the set win and are all offered as options
/// (video siblings in a mixed set are ignored). A video-only set
/// auto-advances to its first video node. An empty set ends playback.
pub fn branch(graph: &Graph, downstream: &[&NodeId]) -> BranchOutcome {
    let texts: Vec<NodeId> = downstream
        .iter()
        .filter(|id| graph.node(id).is_some_and(|n| n.kind() == NodeKind::Text))
        .map(|id| (*id).clone())
        .collect();
    if !texts.is_empty() {
        return BranchOutcome::Options(texts);
    }

    downstream
        .iter()
        .find(|id| graph.node(id).is_some_and(|n| n.kind() == NodeKind::Video))
        .map_or(BranchOutcome::End, |id| BranchOutcome::Advance((*id).clone()))
}

/// Re-apply the branching rule after a text option is clicked.
///
/// A dead-end option (no downstream) yields [`BranchOutcome::End`]; the
/// player logs it and keeps the current frame, it is not fatal.
pub fn resolve_choice(graph: &Graph, text_node: &NodeId) -> BranchOutcome {
    let downstream = downstream_of(graph, text_node);
    let outcome = branch(graph, &downstream);
    if outcome == BranchOutcome::End {
        tracing::debug!("option {text_node} has no downstream nodes");
    }
    outcome
}
