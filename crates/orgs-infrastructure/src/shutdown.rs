//! Shutdown coordination
//!
//! One root [`CancellationToken`] per process. Long-running work (lock retry
//! loops, the sync pipeline) holds a child token so a single signal stops
//! everything from admitting new work.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Owns the root cancellation token of the process
#[derive(Debug, Clone, Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for a component; cancelled when shutdown is signalled
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn signal_shutdown(&self) {
        if !self.token.is_cancelled() {
            info!("Shutdown signal received");
        }
        self.token.cancel();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait asynchronously until shutdown is signalled
    pub async fn wait_for_shutdown(&self) {
        self.token.cancelled().await;
    }

    /// Signal shutdown on the first Ctrl-C
    ///
    /// The returned task ends on its own once shutdown is signalled by any
    /// other means.
    pub fn listen_for_ctrl_c(&self) -> JoinHandle<()> {
        let coordinator = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = coordinator.wait_for_shutdown() => {}
                signal = tokio::signal::ctrl_c() => match signal {
                    Ok(()) => coordinator.signal_shutdown(),
                    Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
                },
            }
        })
    }
}
