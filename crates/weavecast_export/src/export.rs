// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export orchestration: the one component with filesystem side effects.
//!
//! Runs as a single cooperative task: ensure the artifact directories,
//! materialize assets, synthesize and write the player, reporting progress
//! at each phase boundary. Any failure becomes a structured error plus a
//! zero-progress observation carrying its message; partial artifacts are
//! acceptable debris, there is no rollback and no cancellation.

use crate::assets::{materialize, VideoSource, VIDEOS_SUBDIR};
use crate::player::synthesize;
use crate::progress::ProgressSink;
use std::path::{Path, PathBuf};
use std::time::Duration;
use weavecast_graph::{routing, Graph};

/// Errors that abort an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The graph has no video node to start playback at
    #[error("Graph has no playable entry node")]
    NoEntryNode,

    /// Destination directory could not be created
    #[error("Failed to create export directory {path:?}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Asset materialization failed (directory creation or a file copy)
    #[error("Failed to materialize video assets: {0}")]
    Assets(#[from] std::io::Error),

    /// The player payloads could not be serialized
    #[error("Failed to synthesize player document: {0}")]
    Synthesize(#[from] serde_json::Error),

    /// The synthesized document could not be written
    #[error("Failed to write player document {path:?}: {source}")]
    WritePlayer {
        /// Path of the failed write
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// A successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    /// Path of the synthesized player document
    pub output_path: PathBuf,
}

/// Export the graph and its resolved video files into `dest_dir`.
///
/// On success the artifact directory holds `index.html` plus a `videos/`
/// folder, and the final progress observation is 100. On failure a
/// `{progress: 0, message: <error>}` observation is emitted and the error
/// returned; whatever was already written stays on disk.
pub async fn export_package(
    graph: &Graph,
    video_files: &[VideoSource],
    dest_dir: &Path,
    progress: &ProgressSink,
) -> Result<ExportOutput, ExportError> {
    match run(graph, video_files, dest_dir, progress).await {
        Ok(output) => {
            tracing::info!("Export finished: {:?}", output.output_path);
            Ok(output)
        }
        Err(e) => {
            tracing::error!("Export failed: {e}");
            progress.emit(0, format!("Export failed: {e}"));
            Err(e)
        }
    }
}

async fn run(
    graph: &Graph,
    video_files: &[VideoSource],
    dest_dir: &Path,
    progress: &ProgressSink,
) -> Result<ExportOutput, ExportError> {
    if routing::find_entry(graph).is_none() {
        return Err(ExportError::NoEntryNode);
    }

    tracing::info!(
        "Starting export of {} nodes / {} video files to {dest_dir:?}",
        graph.node_count(),
        video_files.len()
    );

    for dir in [dest_dir.to_path_buf(), dest_dir.join(VIDEOS_SUBDIR)] {
        std::fs::create_dir_all(&dir).map_err(|source| ExportError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }

    progress.emit(
        10,
        format!("Preparing to export {} video files...", video_files.len()),
    );
    tokio::time::sleep(Duration::from_millis(100)).await;

    let assets = materialize(video_files, dest_dir, progress).await?;

    progress.emit(80, "Generating player document...");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let document = synthesize(graph, &assets)?;
    let output_path = dest_dir.join("index.html");
    std::fs::write(&output_path, document).map_err(|source| ExportError::WritePlayer {
        path: output_path.clone(),
        source,
    })?;

    progress.emit(90, "Player document written, finishing up...");
    tokio::time::sleep(Duration::from_millis(100)).await;

    progress.emit(100, "Export complete!");

    Ok(ExportOutput { output_path })
}
