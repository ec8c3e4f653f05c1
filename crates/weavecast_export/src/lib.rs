// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export pipeline for Weavecast.
//!
//! Takes an authored graph plus the resolved source video files and emits
//! a self-contained playable artifact directory:
//!
//! ```text
//! <dest>/
//!   index.html   -- synthesized interactive player
//!   videos/      -- materialized source videos, collision-free names
//! ```
//!
//! ## Architecture
//!
//! - [`assets`] copies source videos into the artifact and captures
//!   provenance (creation timestamps)
//! - [`player`] synthesizes the standalone player document (pure function)
//! - [`export`] orchestrates the phases and owns all filesystem effects
//! - [`progress`] is the one-way observation channel back to the shell

pub mod assets;
pub mod export;
pub mod player;
pub mod progress;

pub use assets::{materialize, MaterializedAssets, VideoSource};
pub use export::{export_package, ExportError, ExportOutput};
pub use player::synthesize;
pub use progress::{ProgressSink, ProgressUpdate};
