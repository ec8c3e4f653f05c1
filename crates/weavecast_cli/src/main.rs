// SPDX-License-Identifier: MIT OR Apache-2.0
//! Weavecast command line shell.
//!
//! Stands in for the desktop shell around the authoring core: opens a
//! project file, derives the video-source list from the graph, and runs
//! the export pipeline, relaying progress observations to the terminal.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use weavecast_export::{export_package, ProgressSink, VideoSource};
use weavecast_graph::{routing, NodeContent, ProjectDocument};

#[derive(Parser)]
#[command(name = "weavecast", version, about = "Branching interactive video authoring")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export a project into a self-contained playable directory
    Export {
        /// Project file (.ive)
        project: PathBuf,
        /// Destination directory for the artifact
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Summarize a project: nodes, edges, entry node
    Info {
        /// Project file (.ive)
        project: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Export { project, out } => run_export(&project, &out).await,
        Command::Info { project } => run_info(&project),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_export(project: &Path, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = ProjectDocument::load(project)?;
    let sources = VideoSource::collect(&doc.graph);

    let (sink, mut rx) = ProgressSink::channel();
    let printer = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            println!("[{:>3}%] {}", update.progress, update.message);
        }
    });

    let output = export_package(&doc.graph, &sources, out, &sink).await;
    drop(sink);
    let _ = printer.await;

    let output = output?;
    println!("Exported to {}", output.output_path.display());
    Ok(())
}

fn run_info(project: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = ProjectDocument::load(project)?;
    let graph = &doc.graph;

    println!(
        "{}: {} nodes, {} edges",
        project.display(),
        graph.node_count(),
        graph.edge_count()
    );

    match routing::find_entry(graph) {
        Some(entry) => println!("entry: {entry}"),
        None => println!("entry: none (project cannot be exported)"),
    }
    let candidates = routing::entry_candidates(graph);
    if candidates.len() > 1 {
        let ids: Vec<&str> = candidates.iter().map(|id| id.as_str()).collect();
        println!(
            "warning: {} entry candidates ({}), declaration order decides",
            ids.len(),
            ids.join(", ")
        );
    }

    for node in graph.nodes() {
        let downstream = routing::downstream_of(graph, &node.id);
        let summary = match &node.content {
            NodeContent::Video(data) => format!("video {}", data.file_name),
            NodeContent::Text(data) => format!("text \"{}\"", data.label),
        };
        println!("  {} [{}] -> {} downstream", node.id, summary, downstream.len());
    }
    Ok(())
}
