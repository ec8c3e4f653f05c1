// SPDX-License-Identifier: MIT OR Apache-2.0
//! Player synthesis: the standalone interactive playback document.
//!
//! [`synthesize`] is a pure function of the graph and the materialized
//! asset maps. The output is a single HTML document with no external
//! dependencies beyond the `videos/` folder next to it; the embedded
//! client script mirrors the routing rules in `weavecast_graph::routing`.
//! No validation happens here - malformed graphs surface as console
//! diagnostics in the artifact, not as synthesis errors.

use crate::assets::MaterializedAssets;
use serde::Serialize;
use weavecast_graph::Graph;

/// Synthesize the player document.
///
/// The graph's nodes and edges and both asset maps are embedded as JSON
/// payloads, structurally lossless, so the client script can reconstruct
/// the node map and route playback entirely offline.
pub fn synthesize(graph: &Graph, assets: &MaterializedAssets) -> Result<String, serde_json::Error> {
    let nodes: Vec<_> = graph.nodes().collect();
    let doc = PLAYER_TEMPLATE
        .replacen("@@NODES@@", &embed_json(&nodes)?, 1)
        .replacen("@@EDGES@@", &embed_json(&graph.edges())?, 1)
        .replacen("@@ASSETS@@", &embed_json(&assets.mapping)?, 1)
        .replacen("@@TIMES@@", &embed_json(&assets.creation_times)?, 1);
    Ok(doc)
}

/// Serialize a payload for embedding inside a `<script>` element.
///
/// Every `<` in the JSON text is emitted as `\u003c`, so a hostile label
/// or file name cannot close the script element and inject markup.
/// `<` only occurs inside JSON string literals, where the escape is a
/// plain character escape - the payload parses back identically.
fn embed_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string_pretty(value)?.replace('<', "\\u003c"))
}

const PLAYER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Interactive Video Player</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 0;
            background-color: #000;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            width: 100%;
            overflow: hidden;
        }

        .video-container {
            position: relative;
            width: 100%;
            height: 100vh;
            max-height: 100vh;
            background-color: #000;
            overflow: hidden;
        }

        video {
            width: 100%;
            height: 100%;
            object-fit: contain;
            display: block;
        }

        .interactive-options {
            position: absolute;
            bottom: 80px;
            left: 0;
            width: 100%;
            display: flex;
            justify-content: center;
            flex-wrap: wrap;
            gap: 15px;
            padding: 0 20px;
            z-index: 10;
        }

        .option {
            background-color: rgba(75, 137, 220, 0.85);
            color: white;
            padding: 12px 24px;
            border-radius: 8px;
            cursor: pointer;
            font-size: 16px;
            transition: all 0.3s ease;
            backdrop-filter: blur(4px);
            max-width: 400px;
            text-align: center;
        }

        .option:hover {
            background-color: rgba(54, 109, 192, 0.95);
            transform: translateY(-3px);
            box-shadow: 0 6px 12px rgba(0, 0, 0, 0.4);
        }

        .creation-time {
            position: absolute;
            top: 15px;
            right: 15px;
            color: #ff4444;
            padding: 8px 12px;
            font-size: 18px;
            font-family: "Courier New", Consolas, monospace;
            font-weight: bold;
            opacity: 0.8;
            z-index: 8;
            pointer-events: none;
            white-space: nowrap;
            display: none;
        }
    </style>
</head>
<body>
    <div class="video-container">
        <video id="videoPlayer" controls controlsList="nofullscreen"></video>
        <div id="creationTime" class="creation-time"></div>
        <div id="options" class="interactive-options"></div>
    </div>

    <script>
    // Embedded payloads
    const graphNodes = @@NODES@@;
    const graphEdges = @@EDGES@@;
    const assetMapping = @@ASSETS@@;
    const creationTimes = @@TIMES@@;

    // Node map rebuilt from the payloads: id -> {type, data, targets}
    const nodeMap = {};

    let currentNodeId = null;
    let currentDownstream = [];

    const videoPlayer = document.getElementById('videoPlayer');
    const creationTimeElement = document.getElementById('creationTime');
    const optionsContainer = document.getElementById('options');

    function initNodeMap() {
        graphNodes.forEach(node => {
            nodeMap[node.id] = {
                id: node.id,
                type: node.type,
                data: node.data || {},
                targets: []
            };
        });
        graphEdges.forEach(edge => {
            if (nodeMap[edge.source]) {
                nodeMap[edge.source].targets.push(edge.target);
            }
        });
    }

    // First video node with no incoming edge, falling back to the first
    // video node. Mirrors the editor's entry resolution.
    function findEntryNode() {
        const targetIds = new Set(graphEdges.map(edge => edge.target));

        for (const node of graphNodes) {
            if (node.type === 'video' && !targetIds.has(node.id)) {
                return node.id;
            }
        }
        for (const node of graphNodes) {
            if (node.type === 'video') {
                return node.id;
            }
        }
        return null;
    }

    function playVideo(nodeId) {
        const node = nodeMap[nodeId];
        if (!node || node.type !== 'video') {
            console.error('Not a playable video node:', nodeId);
            return;
        }

        currentNodeId = nodeId;
        currentDownstream = node.targets || [];

        const videoPath = assetMapping[nodeId];
        if (!videoPath) {
            console.error('No materialized video for node:', nodeId);
            return;
        }

        videoPlayer.src = videoPath;
        videoPlayer.load();
        videoPlayer.play().catch(err => {
            console.error('Video playback failed:', err);
        });

        const creationTime = creationTimes[nodeId];
        if (creationTime) {
            creationTimeElement.textContent = creationTime;
            creationTimeElement.style.display = 'block';
        } else {
            creationTimeElement.style.display = 'none';
        }

        optionsContainer.innerHTML = '';
    }

    // Branching rule: text options win over video siblings; a video-only
    // set auto-advances; an empty set ends playback.
    function showOptions(nodeIds) {
        optionsContainer.innerHTML = '';
        if (!nodeIds || nodeIds.length === 0) {
            return;
        }

        const textNodes = nodeIds.filter(id => nodeMap[id] && nodeMap[id].type === 'text');
        if (textNodes.length > 0) {
            textNodes.forEach(nodeId => {
                const option = document.createElement('div');
                option.className = 'option';
                option.textContent = nodeMap[nodeId].data.label || 'Continue';
                option.addEventListener('click', () => handleOptionClick(nodeId));
                optionsContainer.appendChild(option);
            });
        } else {
            const videoNodes = nodeIds.filter(id => nodeMap[id] && nodeMap[id].type === 'video');
            if (videoNodes.length > 0) {
                setTimeout(() => {
                    playVideo(videoNodes[0]);
                }, 100);
            }
        }
    }

    function handleOptionClick(nodeId) {
        const node = nodeMap[nodeId];
        if (!node) {
            console.error('Unknown node id:', nodeId);
            return;
        }

        const targets = node.targets || [];
        const textTargets = targets.filter(id => nodeMap[id] && nodeMap[id].type === 'text');
        const videoTargets = targets.filter(id => nodeMap[id] && nodeMap[id].type === 'video');

        if (textTargets.length > 0) {
            showOptions(targets);
        } else if (videoTargets.length > 0) {
            playVideo(videoTargets[0]);
        } else {
            console.log('Dead-end option, nothing downstream:', nodeId);
        }
    }

    videoPlayer.addEventListener('ended', () => {
        if (currentDownstream.length > 0) {
            showOptions(currentDownstream);
        } else {
            console.log('Playback finished, no downstream nodes');
        }
    });

    document.addEventListener('DOMContentLoaded', () => {
        initNodeMap();

        const entryNodeId = findEntryNode();
        if (entryNodeId) {
            playVideo(entryNodeId);
        } else {
            console.error('No playable entry node in graph');
            document.body.innerHTML = '<h1 style="color: white; text-align: center;">Error: no playable video node</h1>';
        }
    });
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use weavecast_graph::{Node, NodeId, VideoData};

    fn graph_with_label(label: &str) -> (Graph, MaterializedAssets) {
        let mut graph = Graph::new();
        graph.add_node(
            Node::video(VideoData {
                file_path: PathBuf::from("/media/a.mp4"),
                file_name: "a.mp4".to_owned(),
                file_size: 9,
            })
            .with_id("a"),
        );
        graph.add_node(Node::text(label).with_id("t"));
        graph.add_edge("a", "t").unwrap();

        let mut assets = MaterializedAssets::default();
        assets
            .mapping
            .insert(NodeId::from("a"), "videos/video_1_2_a.mp4".to_owned());
        assets
            .creation_times
            .insert(NodeId::from("a"), "2024/05/01 12:00:00".to_owned());
        (graph, assets)
    }

    #[test]
    fn document_embeds_asset_paths_and_times() {
        let (graph, assets) = graph_with_label("Keep going");
        let doc = synthesize(&graph, &assets).unwrap();

        assert!(doc.contains("videos/video_1_2_a.mp4"));
        assert!(doc.contains("2024/05/01 12:00:00"));
        assert!(doc.contains("Keep going"));
        // All placeholder tokens were substituted.
        assert!(!doc.contains("@@"));
    }

    #[test]
    fn hostile_labels_cannot_close_the_script_element() {
        let (graph, assets) = graph_with_label("</script><script>alert(1)</script>");
        let doc = synthesize(&graph, &assets).unwrap();

        assert!(!doc.contains("</script><script>alert"));
        assert!(doc.contains("\\u003c/script>\\u003cscript>alert(1)"));
    }

    #[test]
    fn escaped_payload_parses_back_identically() {
        let label = "a < b </script>";
        let json = embed_json(&label).unwrap();
        let back: String = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }

    #[test]
    fn synthesis_does_not_validate_the_graph() {
        // Empty graph, empty maps: still a well-formed document.
        let doc = synthesize(&Graph::new(), &MaterializedAssets::default()).unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("findEntryNode"));
    }
}
