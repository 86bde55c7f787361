//! Infrastructure Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`LockService`] | Remote TTL-based mutual exclusion, single attempt per call |
//! | [`DistributedMutex`] | Retrying, multi-key claims on top of a lock service |

/// Remote lock service port
pub mod lock;
/// Distributed mutex port
pub mod mutex;

pub use lock::{LockGuard, LockService, ReleaseOutcome};
pub use mutex::{DistributedMutex, Lock};
