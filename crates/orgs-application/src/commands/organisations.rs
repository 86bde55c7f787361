use crate::validation::validate_slug;
use validator::Validate;

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateOrganisationCommand {
    #[validate(required, length(min = 3))]
    pub name: Option<String>,

    #[validate(required, length(min = 3), custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

impl CreateOrganisationCommand {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, slug: S) -> Self {
        Self {
            name: Some(name.into()),
            slug: Some(slug.into()),
        }
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateOrganisationCommand {
    pub id: String,

    #[validate(length(min = 3))]
    pub name: Option<String>,

    #[validate(length(min = 3), custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

impl UpdateOrganisationCommand {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_slug<S: Into<String>>(mut self, slug: S) -> Self {
        self.slug = Some(slug.into());
        self
    }
}
