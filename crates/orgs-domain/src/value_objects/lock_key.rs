//! Lock keys for guarded mutations
//!
//! Every key is `<resource>:<scope>`. Keys order lexically, which is the
//! canonical acquisition order used by multi-key claims.

use std::fmt;

/// Name of a distributed lock
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LockKey(String);

impl LockKey {
    /// An arbitrary key
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Claimed while a slug is being taken by an organisation
    pub fn organisation_slug(slug: &str) -> Self {
        Self(format!("organisation_slug:{slug}"))
    }

    /// Claimed while an organisation is being edited
    pub fn organisation_edit(id: &str) -> Self {
        Self(format!("organisation_edit:{id}"))
    }

    /// Claimed while a slug is being taken within an organisation
    pub fn venue_slug(organisation_id: &str, slug: &str) -> Self {
        Self(format!("venue_slug:{organisation_id}:{slug}"))
    }

    /// Claimed while a venue is being edited
    pub fn venue_edit(id: &str) -> Self {
        Self(format!("venue_edit:{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LockKey> for String {
    fn from(key: LockKey) -> Self {
        key.0
    }
}
