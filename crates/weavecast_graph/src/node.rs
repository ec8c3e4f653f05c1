// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the branching video graph.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a node.
///
/// Ids are opaque strings: the editor mints UUIDs for new nodes, but any
/// string unique within its graph is accepted when loading a project file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Mint a new random node ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Plays a source video file
    Video,
    /// A clickable text choice
    Text,
}

/// Reference to a source video file, as resolved by the authoring UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoData {
    /// Absolute path to the source file on the local filesystem
    pub file_path: PathBuf,
    /// Display name (usually the file's base name)
    pub file_name: String,
    /// Source file size in bytes at the time it was picked
    pub file_size: u64,
}

/// Label for a text-choice node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    /// Text shown on the clickable option
    pub label: String,
}

/// Type-specific node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeContent {
    /// Video playback node
    Video(VideoData),
    /// Text choice node
    Text(TextData),
}

impl NodeContent {
    /// Get the node type category
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeContent::Video(_) => NodeKind::Video,
            NodeContent::Text(_) => NodeKind::Text,
        }
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Position on the authoring canvas
    pub position: [f32; 2],
    /// Type-specific payload
    #[serde(flatten)]
    pub content: NodeContent,
}

impl Node {
    /// Create a new video node referencing a source file
    pub fn video(data: VideoData) -> Self {
        Self {
            id: NodeId::generate(),
            position: [0.0, 0.0],
            content: NodeContent::Video(data),
        }
    }

    /// Create a new text-choice node
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            id: NodeId::generate(),
            position: [0.0, 0.0],
            content: NodeContent::Text(TextData {
                label: label.into(),
            }),
        }
    }

    /// Set the canvas position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Override the generated id (used when loading authored documents)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = NodeId(id.into());
        self
    }

    /// Get the node type category
    pub fn kind(&self) -> NodeKind {
        self.content.kind()
    }

    /// Get the video payload, if this is a video node
    pub fn video_data(&self) -> Option<&VideoData> {
        match &self.content {
            NodeContent::Video(data) => Some(data),
            NodeContent::Text(_) => None,
        }
    }

    /// Get the text payload, if this is a text node
    pub fn text_data(&self) -> Option<&TextData> {
        match &self.content {
            NodeContent::Text(data) => Some(data),
            NodeContent::Video(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn node_content_round_trips_with_type_tag() {
        let node = Node::text("Take the left door").with_id("n1");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["data"]["label"], "Take the left door");

        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn video_node_carries_source_reference() {
        let node = Node::video(VideoData {
            file_path: PathBuf::from("/media/intro.mp4"),
            file_name: "intro.mp4".to_owned(),
            file_size: 1024,
        });
        assert_eq!(node.kind(), NodeKind::Video);
        assert_eq!(node.video_data().unwrap().file_name, "intro.mp4");
        assert!(node.text_data().is_none());
    }
}
