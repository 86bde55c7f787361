//! Venue Service Use Case
//!
//! Same guarded protocol as organisations, with slugs scoped to the
//! owning organisation.

use crate::commands::{CreateVenueCommand, UpdateVenueCommand};
use crate::domain_services::VenueServiceInterface;
use crate::use_cases::guarded_mutation::{UniquenessGuard, found};
use crate::validation::{ValidateCommand, required};
use async_trait::async_trait;
use orgs_domain::constants::{CONFLICT_SLUG_IN_USE, CONFLICT_VENUE_EDITING, FIELD_SLUG};
use orgs_domain::entities::{Address, Coordinates, Venue, VenueType};
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::{DistributedMutex, VenueRepository};
use orgs_domain::value_objects::{LockKey, ValidationErrors};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

fn parse_venue_type(value: &str) -> Result<VenueType> {
    value.parse().map_err(|message: String| {
        let mut errors = ValidationErrors::new();
        errors.add("venue_type", message);
        Error::Validation(errors)
    })
}

/// Venue service implementation
pub struct VenueService {
    repository: Arc<dyn VenueRepository>,
    guard: UniquenessGuard,
}

impl VenueService {
    pub fn new(repository: Arc<dyn VenueRepository>, mutex: Arc<dyn DistributedMutex>) -> Self {
        Self {
            repository,
            guard: UniquenessGuard::new(mutex),
        }
    }

    #[must_use]
    pub fn with_lock_ttl(mut self, ttl: Duration) -> Self {
        self.guard = self.guard.with_ttl(ttl);
        self
    }

    async fn ensure_slug_free(
        &self,
        slug: &str,
        organisation_id: &str,
        candidate: Option<&Venue>,
    ) -> Result<()> {
        let lookup = self
            .repository
            .by_slug_and_organisation(slug, organisation_id)
            .await;
        let Some(existing) = found(lookup)? else {
            return Ok(());
        };

        if candidate.is_none_or(|c| c.is_other(&existing)) {
            return Err(ValidationErrors::not_unique(FIELD_SLUG).into());
        }
        Ok(())
    }

    fn build(command: &CreateVenueCommand) -> Result<Venue> {
        let venue_type = required(command.venue_type.as_ref(), "venue_type")?;
        Ok(Venue {
            id: None,
            organisation_id: required(command.organisation_id.as_ref(), "organisation_id")?,
            name: required(command.name.as_ref(), "name")?,
            slug: required(command.slug.as_ref(), FIELD_SLUG)?,
            venue_type: parse_venue_type(&venue_type)?,
            address: Address {
                line_1: required(command.address_line_1.as_ref(), "address_line_1")?,
                line_2: command.address_line_2.clone(),
                municipality: required(command.municipality.as_ref(), "municipality")?,
                postcode: required(command.postcode.as_ref(), "postcode")?,
                coordinates: Coordinates {
                    lat: required(command.lat.as_ref(), "lat")?,
                    long: required(command.long.as_ref(), "long")?,
                },
            },
        })
    }

    /// Copy every supplied field of `command` onto `venue`, except the slug
    fn apply(venue: &mut Venue, command: UpdateVenueCommand) -> Result<()> {
        if let Some(name) = command.name {
            venue.name = name;
        }
        if let Some(venue_type) = command.venue_type {
            venue.venue_type = parse_venue_type(&venue_type)?;
        }

        let address = &mut venue.address;
        if let Some(line_1) = command.address_line_1 {
            address.line_1 = line_1;
        }
        if command.nullify_address_line_2 {
            address.line_2 = None;
        } else if let Some(line_2) = command.address_line_2 {
            address.line_2 = Some(line_2);
        }
        if let Some(municipality) = command.municipality {
            address.municipality = municipality;
        }
        if let Some(postcode) = command.postcode {
            address.postcode = postcode;
        }
        if let Some(lat) = command.lat {
            address.coordinates.lat = lat;
        }
        if let Some(long) = command.long {
            address.coordinates.long = long;
        }
        Ok(())
    }
}

#[async_trait]
impl VenueServiceInterface for VenueService {
    async fn create(&self, command: CreateVenueCommand) -> Result<Venue> {
        command.validate_command()?;
        let venue = Self::build(&command)?;

        self.ensure_slug_free(&venue.slug, &venue.organisation_id, None)
            .await?;

        let keys = [LockKey::venue_slug(&venue.organisation_id, &venue.slug)];
        let venue = self
            .guard
            .run_locked(&keys, CONFLICT_SLUG_IN_USE, || async move {
                self.ensure_slug_free(&venue.slug, &venue.organisation_id, None)
                    .await?;
                self.repository.save(venue).await
            })
            .await?;

        info!(id = ?venue.id, organisation_id = %venue.organisation_id, slug = %venue.slug, "venue created");
        Ok(venue)
    }

    async fn update(&self, command: UpdateVenueCommand) -> Result<Venue> {
        command.validate_command()?;

        let current = self
            .repository
            .get(&command.id, &command.organisation_id)
            .await?;

        // The pre-lock read may be stale, so a supplied slug is always claimed
        let mut keys = vec![LockKey::venue_edit(&command.id)];
        if let Some(slug) = command.slug.as_deref() {
            self.ensure_slug_free(slug, &command.organisation_id, Some(&current))
                .await?;
            keys.push(LockKey::venue_slug(&command.organisation_id, slug));
        }

        let venue = self
            .guard
            .run_locked(&keys, CONFLICT_VENUE_EDITING, || async move {
                let mut venue = self
                    .repository
                    .get(&command.id, &command.organisation_id)
                    .await?;
                if let Some(slug) = &command.slug {
                    self.ensure_slug_free(slug, &command.organisation_id, Some(&venue))
                        .await?;
                    venue.slug.clone_from(slug);
                }
                Self::apply(&mut venue, command)?;
                self.repository.save(venue).await
            })
            .await?;

        info!(id = ?venue.id, organisation_id = %venue.organisation_id, slug = %venue.slug, "venue updated");
        Ok(venue)
    }

    async fn get(&self, id: &str, organisation_id: &str) -> Result<Venue> {
        self.repository.get(id, organisation_id).await
    }

    async fn delete(&self, id: &str, organisation_id: &str) -> Result<()> {
        let keys = [LockKey::venue_edit(id)];
        self.guard
            .run_locked(&keys, CONFLICT_VENUE_EDITING, || async move {
                let venue = self.repository.get(id, organisation_id).await?;
                self.repository.delete(&venue).await
            })
            .await?;

        info!(id, organisation_id, "venue deleted");
        Ok(())
    }
}
