//! Organisation Service Use Case
//!
//! Organisation mutations with slug uniqueness enforced across instances:
//! validate, optimistic check, claim, authoritative re-check, write,
//! release.

use crate::commands::{CreateOrganisationCommand, UpdateOrganisationCommand};
use crate::domain_services::OrganisationServiceInterface;
use crate::use_cases::guarded_mutation::{UniquenessGuard, found};
use crate::validation::{ValidateCommand, required};
use async_trait::async_trait;
use orgs_domain::constants::{CONFLICT_ORGANISATION_EDITING, CONFLICT_SLUG_IN_USE, FIELD_SLUG};
use orgs_domain::entities::Organisation;
use orgs_domain::error::Result;
use orgs_domain::ports::{DistributedMutex, OrganisationRepository};
use orgs_domain::value_objects::{LockKey, ValidationErrors};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Organisation service implementation
pub struct OrganisationService {
    repository: Arc<dyn OrganisationRepository>,
    guard: UniquenessGuard,
}

impl OrganisationService {
    pub fn new(
        repository: Arc<dyn OrganisationRepository>,
        mutex: Arc<dyn DistributedMutex>,
    ) -> Self {
        Self {
            repository,
            guard: UniquenessGuard::new(mutex),
        }
    }

    /// Override the TTL of mutation locks
    #[must_use]
    pub fn with_lock_ttl(mut self, ttl: Duration) -> Self {
        self.guard = self.guard.with_ttl(ttl);
        self
    }

    /// Fail when `slug` belongs to an organisation other than `candidate`
    ///
    /// With no candidate (a create) any holder of the slug is a conflict.
    async fn ensure_slug_free(&self, slug: &str, candidate: Option<&Organisation>) -> Result<()> {
        let Some(existing) = found(self.repository.by_slug(slug).await)? else {
            return Ok(());
        };

        if candidate.is_none_or(|c| c.is_other(&existing)) {
            return Err(ValidationErrors::not_unique(FIELD_SLUG).into());
        }
        Ok(())
    }
}

#[async_trait]
impl OrganisationServiceInterface for OrganisationService {
    async fn create(&self, command: CreateOrganisationCommand) -> Result<Organisation> {
        command.validate_command()?;
        let name = required(command.name.as_ref(), "name")?;
        let slug = required(command.slug.as_ref(), FIELD_SLUG)?;

        self.ensure_slug_free(&slug, None).await?;

        let keys = [LockKey::organisation_slug(&slug)];
        let organisation = self
            .guard
            .run_locked(&keys, CONFLICT_SLUG_IN_USE, || async move {
                self.ensure_slug_free(&slug, None).await?;
                self.repository.save(Organisation::new(name, slug)).await
            })
            .await?;

        info!(id = ?organisation.id, slug = %organisation.slug, "organisation created");
        Ok(organisation)
    }

    async fn update(&self, command: UpdateOrganisationCommand) -> Result<Organisation> {
        command.validate_command()?;

        let current = self.repository.get(&command.id).await?;

        // The pre-lock read may be stale, so a supplied slug is always claimed
        let mut keys = vec![LockKey::organisation_edit(&command.id)];
        if let Some(slug) = command.slug.as_deref() {
            self.ensure_slug_free(slug, Some(&current)).await?;
            keys.push(LockKey::organisation_slug(slug));
        }

        let UpdateOrganisationCommand { id, name, slug } = command;
        let organisation = self
            .guard
            .run_locked(&keys, CONFLICT_ORGANISATION_EDITING, || async move {
                let mut organisation = self.repository.get(&id).await?;
                if let Some(slug) = slug {
                    self.ensure_slug_free(&slug, Some(&organisation)).await?;
                    organisation.slug = slug;
                }
                if let Some(name) = name {
                    organisation.name = name;
                }
                self.repository.save(organisation).await
            })
            .await?;

        info!(id = ?organisation.id, slug = %organisation.slug, "organisation updated");
        Ok(organisation)
    }

    async fn get(&self, id: &str) -> Result<Organisation> {
        self.repository.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let keys = [LockKey::organisation_edit(id)];
        self.guard
            .run_locked(&keys, CONFLICT_ORGANISATION_EDITING, || async move {
                let organisation = self.repository.get(id).await?;
                self.repository.delete(&organisation).await
            })
            .await?;

        info!(id, "organisation deleted");
        Ok(())
    }
}
