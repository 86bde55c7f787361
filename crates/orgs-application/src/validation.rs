//! Command validation
//!
//! Commands declare their rules with `validator` derives. This module holds
//! the custom rules and the table that turns rule codes into the messages
//! callers see, so failures surface as [`ValidationErrors`] keyed by field.

use orgs_domain::entities::VenueType;
use orgs_domain::error::{Error, Result};
use orgs_domain::value_objects::ValidationErrors;
use regex::Regex;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// Rule codes used by the custom validators
pub mod codes {
    pub const REQUIRED: &str = "required";
    pub const LENGTH: &str = "length";
    pub const RANGE: &str = "range";
    pub const SLUG: &str = "slug";
    pub const POSTCODE: &str = "postcode";
    pub const VENUE_TYPE: &str = "venue_type";
}

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*$").expect("Invalid regex"));

static POSTCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z]{1,2}\d[a-z\d]?\s*\d[a-z]{2}$").expect("Invalid regex")
});

/// Lowercase alphanumerics and hyphens, not starting with a hyphen
pub fn validate_slug(slug: &str) -> std::result::Result<(), ValidationError> {
    if SLUG_PATTERN.is_match(slug) {
        Ok(())
    } else {
        Err(ValidationError::new(codes::SLUG))
    }
}

/// UK-style postcode, case-insensitive, optional inner whitespace
pub fn validate_postcode(postcode: &str) -> std::result::Result<(), ValidationError> {
    if POSTCODE_PATTERN.is_match(postcode) {
        Ok(())
    } else {
        Err(ValidationError::new(codes::POSTCODE))
    }
}

pub fn validate_venue_type(venue_type: &str) -> std::result::Result<(), ValidationError> {
    venue_type
        .parse::<VenueType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new(codes::VENUE_TYPE))
}

/// Render a numeric rule parameter, dropping a trailing `.0`
fn param(error: &ValidationError, name: &str) -> String {
    error
        .params
        .get(name)
        .and_then(serde_json::Value::as_f64)
        .map_or_else(String::new, |v| format!("{v}"))
}

/// Message for a single rule failure
fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        codes::REQUIRED => "is required".to_string(),
        codes::LENGTH => format!("must be more than {} characters long", param(error, "min")),
        codes::RANGE => format!("must be larger than {}", param(error, "min")),
        codes::SLUG => {
            "must contain only alphanumeric and hyphen characters; cannot start with a hyphen"
                .to_string()
        }
        codes::POSTCODE => "must be a valid postcode".to_string(),
        codes::VENUE_TYPE => {
            let allowed: Vec<&str> = VenueType::ALL.iter().map(VenueType::as_str).collect();
            format!("must be one of: '{}'", allowed.join("', '"))
        }
        other => format!("failed rule '{other}'"),
    }
}

/// Convert `validator` output into field errors, ordered by field name
pub fn to_validation_errors(errors: &validator::ValidationErrors) -> ValidationErrors {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ValidationErrors::new();
    for (field, failures) in fields {
        for failure in failures {
            out.add(field.to_string(), message_for(failure));
        }
    }
    out
}

/// Validate a command, mapping failures onto the domain error type
pub trait ValidateCommand {
    fn validate_command(&self) -> Result<()>;
}

impl<T: Validate> ValidateCommand for T {
    fn validate_command(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| Error::Validation(to_validation_errors(&errors)))
    }
}

/// Unwrap a field that validation has already declared required
pub(crate) fn required<T: Clone>(value: Option<&T>, field: &str) -> Result<T> {
    value.cloned().ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add(field, "is required");
        Error::Validation(errors)
    })
}
