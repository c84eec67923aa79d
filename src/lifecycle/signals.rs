//! Signal handling: Ctrl-C cancels in-flight confirmation waits.

use crate::lifecycle::shutdown::Shutdown;

/// Spawn a task that triggers `shutdown` on the first Ctrl-C.
pub fn cancel_on_ctrl_c(shutdown: &Shutdown) -> tokio::task::JoinHandle<()> {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, cancelling pending operations");
                shutdown.trigger();
            }
            Err(e) => tracing::warn!(error = %e, "Could not install Ctrl-C handler"),
        }
    })
}
