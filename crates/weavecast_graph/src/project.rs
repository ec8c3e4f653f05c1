// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted project documents and the editing session.
//!
//! A project file is a JSON document holding the full graph (nodes with
//! positions and type-specific data, plus edges). There is no schema
//! version field; forward/backward compatibility is a non-goal.
//!
//! The session tracks which path the document is bound to, replacing the
//! hidden process-wide "current file" state a desktop shell tends to grow.

use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project file extension, enforced at save time
pub const PROJECT_EXTENSION: &str = "ive";

/// Errors from loading or saving project documents
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Filesystem failure
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid project JSON
    #[error("Invalid project file {path:?}: {source}")]
    Parse {
        /// Path of the rejected file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Save was requested before the session was bound to a path
    #[error("No file path bound to this session; use save_as")]
    NoPathBound,
}

/// A persisted project: the full authoring graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    /// The branching video graph
    pub graph: Graph,
}

impl ProjectDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from a JSON project file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ProjectError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the document as pretty JSON to the given path
    pub fn save_to(&self, path: &Path) -> Result<(), ProjectError> {
        let content = serde_json::to_string_pretty(self).map_err(|source| ProjectError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Append the project extension when the path lacks it (case-insensitive)
pub fn ensure_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PROJECT_EXTENSION));
    if has_ext {
        path.to_path_buf()
    } else {
        let mut s = path.as_os_str().to_owned();
        s.push(".");
        s.push(PROJECT_EXTENSION);
        PathBuf::from(s)
    }
}

/// Editing session: the document's bound path and dirty state
#[derive(Debug, Default)]
pub struct DocumentSession {
    /// Path the document was opened from or last saved to
    pub path: Option<PathBuf>,
    /// Whether the document has unsaved changes
    pub dirty: bool,
}

impl DocumentSession {
    /// Create a session with no bound path (a fresh document)
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a project file, binding the session to its path
    pub fn open(&mut self, path: &Path) -> Result<ProjectDocument, ProjectError> {
        let doc = ProjectDocument::load(path)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        tracing::info!("Opened project at {path:?}");
        Ok(doc)
    }

    /// Save to the bound path; errors if the session has none yet
    pub fn save(&mut self, doc: &ProjectDocument) -> Result<PathBuf, ProjectError> {
        let path = self.path.clone().ok_or(ProjectError::NoPathBound)?;
        self.save_as(doc, &path)
    }

    /// Save to an explicit path, binding the session to it.
    ///
    /// The project extension is appended when missing; the returned path is
    /// the one actually written.
    pub fn save_as(&mut self, doc: &ProjectDocument, path: &Path) -> Result<PathBuf, ProjectError> {
        let path = ensure_extension(path);
        doc.save_to(&path)?;
        self.path = Some(path.clone());
        self.dirty = false;
        tracing::info!("Saved project to {path:?}");
        Ok(path)
    }

    /// Start a fresh document, clearing the bound path
    pub fn new_document(&mut self) -> ProjectDocument {
        self.path = None;
        self.dirty = false;
        ProjectDocument::new()
    }

    /// Mark the document as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check whether the document has unsaved changes
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeId, VideoData};

    fn sample_doc() -> ProjectDocument {
        let mut graph = Graph::new();
        graph.add_node(
            Node::video(VideoData {
                file_path: PathBuf::from("/media/intro.mp4"),
                file_name: "intro.mp4".to_owned(),
                file_size: 2048,
            })
            .with_id("start")
            .with_position(40.0, 80.0),
        );
        graph.add_node(Node::text("Go on?").with_id("choice"));
        graph.add_edge("start", "choice").unwrap();
        ProjectDocument { graph }
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = sample_doc();
        let json = serde_json::to_string(&doc).unwrap();
        let back: ProjectDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn save_as_appends_missing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = DocumentSession::new();
        let doc = sample_doc();

        let written = session.save_as(&doc, &dir.path().join("story")).unwrap();
        assert_eq!(written.extension().unwrap(), "ive");
        assert!(written.exists());
        assert_eq!(session.path.as_deref(), Some(written.as_path()));
    }

    #[test]
    fn save_as_keeps_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = DocumentSession::new();
        let written = session
            .save_as(&sample_doc(), &dir.path().join("story.IVE"))
            .unwrap();
        assert_eq!(written.file_name().unwrap(), "story.IVE");
    }

    #[test]
    fn save_without_bound_path_errors() {
        let mut session = DocumentSession::new();
        let err = session.save(&sample_doc()).unwrap_err();
        assert!(matches!(err, ProjectError::NoPathBound));
    }

    #[test]
    fn open_round_trips_a_saved_document() {
        let dir = tempfile::tempdir().unwrap();
        let doc = sample_doc();

        let mut writer = DocumentSession::new();
        let path = writer.save_as(&doc, &dir.path().join("story.ive")).unwrap();

        let mut reader = DocumentSession::new();
        let loaded = reader.open(&path).unwrap();
        assert_eq!(loaded, doc);
        assert_eq!(
            loaded.graph.node(&NodeId::from("start")).unwrap().position,
            [40.0, 80.0]
        );
        assert!(!reader.has_unsaved_changes());
    }

    #[test]
    fn saving_clears_the_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let doc = sample_doc();
        let mut session = DocumentSession::new();
        session.save_as(&doc, &dir.path().join("story.ive")).unwrap();

        session.mark_dirty();
        assert!(session.has_unsaved_changes());

        session.save(&doc).unwrap();
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn new_document_clears_the_bound_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = DocumentSession::new();
        session
            .save_as(&sample_doc(), &dir.path().join("story.ive"))
            .unwrap();

        session.new_document();
        assert!(session.path.is_none());
    }
}
