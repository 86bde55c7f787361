//! Organisation aggregate

use serde::{Deserialize, Serialize};

/// An organisation; `slug` is unique across all organisations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organisation {
    /// Store-assigned identifier, `None` until first saved
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
}

impl Organisation {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, slug: S) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Whether `other` is a different persisted entity than this one
    pub fn is_other(&self, other: &Organisation) -> bool {
        self.id.is_none() || self.id != other.id
    }
}
