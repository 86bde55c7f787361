//! Field-level validation failures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message used when a unique field is already taken by another entity
pub const MUST_BE_UNIQUE: &str = "must be unique";

/// All failures for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as declared on the command
    pub key: String,
    /// Human readable failure messages
    pub errors: Vec<String>,
}

/// Ordered collection of field failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single "must be unique" failure on `key`
    pub fn not_unique<S: Into<String>>(key: S) -> Self {
        let mut errors = Self::new();
        errors.add(key, MUST_BE_UNIQUE);
        errors
    }

    /// Record a failure, grouping messages under an existing key
    pub fn add<K: Into<String>, M: Into<String>>(&mut self, key: K, message: M) {
        let key = key.into();
        let message = message.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.errors.push(message),
            None => self.fields.push(FieldError {
                key,
                errors: vec![message],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    /// Messages recorded for `key`, if any
    pub fn field(&self, key: &str) -> Option<&FieldError> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Whether `key` failed the uniqueness check
    pub fn is_not_unique(&self, key: &str) -> bool {
        self.field(key)
            .is_some_and(|f| f.errors.iter().any(|e| e == MUST_BE_UNIQUE))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.key, field.errors.join(", ")))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}
