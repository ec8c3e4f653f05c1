// SPDX-License-Identifier: MIT OR Apache-2.0
//! Asset materialization: copying source videos into the artifact.
//!
//! Each referenced source file lands in `<dest>/videos/` under a
//! collision-free name, so repeated exports (or repeating base names)
//! never overwrite each other. Provenance is best-effort: an unreadable
//! creation timestamp degrades to an empty string, never an error.

use crate::progress::ProgressSink;
use indexmap::IndexMap;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use weavecast_graph::{Graph, NodeId, NodeKind};

/// Subdirectory of the artifact holding materialized videos
pub const VIDEOS_SUBDIR: &str = "videos";

/// One video file to materialize, as resolved by the shell.
///
/// This is the collaborator contract: `file_path` must be resolvable on
/// the local filesystem at export time; the pipeline does no resolution
/// of relative or virtual paths.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSource {
    /// Graph node this file belongs to
    pub node_id: NodeId,
    /// Resolved source path
    pub file_path: PathBuf,
    /// Display name, used in progress messages and the destination name
    pub file_name: String,
}

impl VideoSource {
    /// Derive the source list from a graph's video nodes, in declaration order
    pub fn collect(graph: &Graph) -> Vec<Self> {
        graph
            .nodes_of_kind(NodeKind::Video)
            .filter_map(|node| {
                let data = node.video_data()?;
                Some(Self {
                    node_id: node.id.clone(),
                    file_path: data.file_path.clone(),
                    file_name: data.file_name.clone(),
                })
            })
            .collect()
    }
}

/// Output of materialization: where each node's video went, and when its
/// source was created
#[derive(Debug, Clone, Default)]
pub struct MaterializedAssets {
    /// Node id -> artifact-relative path (`videos/<name>`).
    ///
    /// Key set is a subset of the source node ids: entries whose source
    /// file was missing are absent, never present with an empty value.
    pub mapping: IndexMap<NodeId, String>,
    /// Node id -> formatted creation timestamp, empty when unreadable
    pub creation_times: IndexMap<NodeId, String>,
}

/// Copy each source video into `<dest_dir>/videos/`.
///
/// Missing sources are skipped with a warning rather than aborting the
/// export; that node simply has no playable video in the artifact.
/// Progress observations cover the [10, 70] band and never decrease;
/// the final copied file lands on exactly 70.
pub async fn materialize(
    sources: &[VideoSource],
    dest_dir: &Path,
    progress: &ProgressSink,
) -> std::io::Result<MaterializedAssets> {
    let videos_dir = dest_dir.join(VIDEOS_SUBDIR);
    std::fs::create_dir_all(&videos_dir)?;

    let mut assets = MaterializedAssets::default();
    let total = sources.len();

    for (i, video) in sources.iter().enumerate() {
        let current = 10 + (i * 60 / total.max(1)) as u32;
        progress.emit(
            current,
            format!("Processing video {}/{}: {}", i + 1, total, video.file_name),
        );
        tokio::time::sleep(Duration::from_millis(50)).await;

        if !video.file_path.exists() {
            tracing::warn!(
                "source video missing, excluding node {} from the artifact: {:?}",
                video.node_id,
                video.file_path
            );
            continue;
        }

        assets
            .creation_times
            .insert(video.node_id.clone(), creation_time_string(&video.file_path));

        let unique_name = unique_video_name(&video.file_path);
        let target = videos_dir.join(&unique_name);
        std::fs::copy(&video.file_path, &target)?;
        assets
            .mapping
            .insert(video.node_id.clone(), format!("{VIDEOS_SUBDIR}/{unique_name}"));

        // Same 60-wide band as the pre-copy emit, one file further along,
        // so the sequence stays non-decreasing and ends at exactly 70.
        let copied = 10 + ((i + 1) * 60 / total.max(1)) as u32;
        progress.emit(copied, format!("Copied {}/{} video files", i + 1, total));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    Ok(assets)
}

/// Collision-free destination name: timestamp + random suffix + base name.
///
/// Two exports of the same source in rapid succession still get distinct
/// names even when the millisecond timestamps collide.
fn unique_video_name(source: &Path) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    let base = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("video");
    format!("video_{millis}_{suffix}_{base}")
}

/// Source file creation time as a formatted local date-time, or empty.
fn creation_time_string(source: &Path) -> String {
    let created = std::fs::metadata(source).and_then(|m| m.created());
    match created {
        Ok(time) => chrono::DateTime::<chrono::Local>::from(time)
            .format("%Y/%m/%d %H:%M:%S")
            .to_string(),
        Err(e) => {
            tracing::warn!("could not read creation time of {source:?}: {e}");
            String::new()
        }
    }
}
