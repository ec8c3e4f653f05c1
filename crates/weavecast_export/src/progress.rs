// SPDX-License-Identifier: MIT OR Apache-2.0
//! One-way progress observations from the export task to its observer.

use tokio::sync::mpsc;

/// A single progress observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Overall progress, 0-100
    pub progress: u32,
    /// Human-readable status line
    pub message: String,
}

/// Fire-and-forget sender for progress observations.
///
/// Delivery is best-effort: a dropped or slow observer never stalls or
/// fails an export. The orchestrator inserts short cooperative sleeps
/// between observations so the observer gets a scheduling opportunity to
/// render each one in order.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: mpsc::UnboundedSender<ProgressUpdate>,
}

impl ProgressSink {
    /// Create a sink/receiver pair
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Emit one observation; send errors are ignored.
    ///
    /// Values above 100 indicate broken band arithmetic in the caller and
    /// trip a debug assertion rather than being clamped out of sight.
    pub fn emit(&self, progress: u32, message: impl Into<String>) {
        debug_assert!(progress <= 100, "progress observation above 100: {progress}");
        let update = ProgressUpdate {
            progress,
            message: message.into(),
        };
        let _ = self.tx.send(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_passes_values_through_unchanged() {
        let (sink, mut rx) = ProgressSink::channel();
        sink.emit(70, "copied");
        assert_eq!(rx.try_recv().unwrap().progress, 70);
    }

    #[test]
    #[should_panic(expected = "progress observation above 100")]
    fn emit_rejects_values_above_one_hundred() {
        let (sink, _rx) = ProgressSink::channel();
        sink.emit(250, "overshoot");
    }

    #[test]
    fn emit_survives_a_dropped_receiver() {
        let (sink, rx) = ProgressSink::channel();
        drop(rx);
        sink.emit(50, "nobody listening");
    }
}
