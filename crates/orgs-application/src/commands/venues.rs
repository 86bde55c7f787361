use crate::validation::{validate_postcode, validate_slug, validate_venue_type};
use validator::Validate;

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateVenueCommand {
    #[validate(required, length(min = 1))]
    pub organisation_id: Option<String>,

    #[validate(required, length(min = 3))]
    pub name: Option<String>,

    #[validate(required, length(min = 3), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(required, custom(function = "validate_venue_type"))]
    pub venue_type: Option<String>,

    #[validate(required, length(min = 1))]
    pub address_line_1: Option<String>,

    #[validate(length(min = 1))]
    pub address_line_2: Option<String>,

    #[validate(required, length(min = 1))]
    pub municipality: Option<String>,

    #[validate(required, custom(function = "validate_postcode"))]
    pub postcode: Option<String>,

    #[validate(required, range(min = 0.0))]
    pub lat: Option<f64>,

    #[validate(required, range(min = 0.0))]
    pub long: Option<f64>,
}

/// Partial update of a venue within its organisation
///
/// `nullify_address_line_2` clears the second address line; it wins over
/// a supplied `address_line_2`.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateVenueCommand {
    pub id: String,

    pub organisation_id: String,

    #[validate(length(min = 3))]
    pub name: Option<String>,

    #[validate(length(min = 3), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(custom(function = "validate_venue_type"))]
    pub venue_type: Option<String>,

    #[validate(length(min = 1))]
    pub address_line_1: Option<String>,

    #[validate(length(min = 1))]
    pub address_line_2: Option<String>,

    pub nullify_address_line_2: bool,

    #[validate(length(min = 1))]
    pub municipality: Option<String>,

    #[validate(custom(function = "validate_postcode"))]
    pub postcode: Option<String>,

    #[validate(range(min = 0.0))]
    pub lat: Option<f64>,

    #[validate(range(min = 0.0))]
    pub long: Option<f64>,
}

impl UpdateVenueCommand {
    pub fn new<I: Into<String>, O: Into<String>>(id: I, organisation_id: O) -> Self {
        Self {
            id: id.into(),
            organisation_id: organisation_id.into(),
            ..Self::default()
        }
    }
}
