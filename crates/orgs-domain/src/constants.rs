//! Domain constants

/// Resource names used in not-found errors
pub const RESOURCE_ORGANISATION: &str = "organisation";
pub const RESOURCE_VENUE: &str = "venue";

/// Field keys reported in validation errors
pub const FIELD_SLUG: &str = "slug";

/// Conflict messages surfaced when a lock cannot be claimed
pub const CONFLICT_SLUG_IN_USE: &str = "slug is being used by another resource";
pub const CONFLICT_ORGANISATION_EDITING: &str = "organisation is already being edited elsewhere";
pub const CONFLICT_VENUE_EDITING: &str = "venue is already being edited elsewhere";
