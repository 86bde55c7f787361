//! Commands
//!
//! Inputs to the use cases. Each command declares its shape rules; the
//! use case validates before touching the store or the mutex.
//!
//! | Command | Use case |
//! |---------|----------|
//! | [`CreateOrganisationCommand`] | Organisation create |
//! | [`UpdateOrganisationCommand`] | Organisation partial update |
//! | [`CreateVenueCommand`] | Venue create |
//! | [`UpdateVenueCommand`] | Venue partial update |
//! | [`SyncCommand`] | Municipality synchronization |

/// Municipality synchronization command
pub mod municipalities;
/// Organisation commands
pub mod organisations;
/// Venue commands
pub mod venues;

pub use municipalities::SyncCommand;
pub use organisations::{CreateOrganisationCommand, UpdateOrganisationCommand};
pub use venues::{CreateVenueCommand, UpdateVenueCommand};
