//! Cancellation coordination for in-flight waits.

use tokio::sync::broadcast;

/// Coordinator for abandoning long-running operations.
///
/// Provides a broadcast channel that confirmation waits subscribe to. A
/// trigger reaches every subscriber alive at that moment.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the cancellation signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the cancellation signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of operations currently listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
