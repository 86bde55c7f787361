//! Value Objects
//!
//! Immutable values that carry no identity of their own: validation
//! failures, lock keys and synchronization results.

/// Lock key naming for guarded mutations
pub mod lock_key;
/// Batch synchronization values
pub mod sync;
/// Field-level validation failures
pub mod validation;

pub use lock_key::LockKey;
pub use sync::{BatchResult, SyncOutcome, UpsertSummary};
pub use validation::{FieldError, ValidationErrors};
