// SPDX-License-Identifier: MIT OR Apache-2.0
//! Branching video graph model for Weavecast.
//!
//! This crate provides the data layer for the interactive video editor:
//! - Video and text-choice nodes with directed edges
//! - Entry node resolution and downstream routing
//! - The playback branching rule (pure graph logic)
//! - Persisted project documents and the editing session context
//!
//! ## Architecture
//!
//! The graph is built by the authoring UI and consumed read-only by the
//! export pipeline. Nodes live in an insertion-ordered map and edges in a
//! plain vector, so declaration order is observable - the entry resolver
//! and the branching rule both depend on it.

pub mod edge;
pub mod graph;
pub mod node;
pub mod project;
pub mod routing;

pub use edge::Edge;
pub use graph::{EdgeError, Graph};
pub use node::{Node, NodeContent, NodeId, NodeKind, TextData, VideoData};
pub use project::{DocumentSession, ProjectDocument, ProjectError, PROJECT_EXTENSION};
pub use routing::{branch, downstream_of, entry_candidates, find_entry, resolve_choice, BranchOutcome};
