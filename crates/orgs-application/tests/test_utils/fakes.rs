//! Instrumented ports
//!
//! Thin wrappers over the in-memory providers that count calls, inject
//! failures and track concurrency.

use async_trait::async_trait;
use orgs_application::{
    BackoffMutex, CreateOrganisationCommand, CreateVenueCommand, OrganisationService,
    OrganisationServiceInterface, RetryPolicy, VenueService, VenueServiceInterface,
};
use orgs_domain::entities::{Address, Coordinates, Municipality, Organisation, Venue, VenueType};
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::{
    LockGuard, LockService, MunicipalitySink, MunicipalitySource, OrganisationRepository,
    ReleaseOutcome, VenueRepository,
};
use orgs_domain::value_objects::UpsertSummary;
use orgs_providers::lock::InMemoryLockService;
use orgs_providers::store::{
    InMemoryMunicipalityStore, InMemoryOrganisationRepository, InMemoryVenueRepository,
};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Retry quickly so contention tests stay fast
pub const FAST_RETRY: RetryPolicy = RetryPolicy {
    interval: Duration::from_millis(10),
    attempts: 3,
};

/// Long enough that nothing expires during a test
pub const LONG_TTL: Duration = Duration::from_secs(30);

// ============================================================================
// Lock service
// ============================================================================

/// In-memory lock service that records every attempt
#[derive(Default)]
pub struct CountingLockService {
    inner: InMemoryLockService,
    attempts: AtomicU32,
    obtained: Mutex<Vec<String>>,
    fail_obtain: AtomicBool,
    fail_release: AtomicBool,
}

impl CountingLockService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inner(&self) -> &InMemoryLockService {
        &self.inner
    }

    /// Take `key` as if another instance held it
    pub async fn hold_elsewhere(&self, key: &str) -> LockGuard {
        self.inner.try_obtain(key, LONG_TTL).await.unwrap().unwrap()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Keys successfully obtained, in acquisition order
    pub fn obtained(&self) -> Vec<String> {
        self.obtained.lock().unwrap().clone()
    }

    pub fn set_fail_obtain(&self, fail: bool) {
        self.fail_obtain.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_release(&self, fail: bool) {
        self.fail_release.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl LockService for CountingLockService {
    async fn try_obtain(&self, key: &str, ttl: Duration) -> Result<Option<LockGuard>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_obtain.load(Ordering::SeqCst) {
            return Err(Error::network("lock service unavailable"));
        }

        let guard = self.inner.try_obtain(key, ttl).await?;
        if guard.is_some() {
            self.obtained.lock().unwrap().push(key.to_string());
        }
        Ok(guard)
    }

    async fn release(&self, guard: &LockGuard) -> Result<ReleaseOutcome> {
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(Error::network("lock service unavailable"));
        }
        self.inner.release(guard).await
    }

    fn provider_name(&self) -> &str {
        "counting"
    }
}

/// Backoff mutex over `service` using [`FAST_RETRY`]
pub fn fast_mutex(service: &Arc<CountingLockService>) -> Arc<BackoffMutex> {
    let service: Arc<dyn LockService> = service.clone();
    Arc::new(BackoffMutex::new(service).with_policy(FAST_RETRY))
}

// ============================================================================
// Repositories
// ============================================================================

/// Organisation repository where a competitor takes the slug right after
/// the first slug lookup, before the caller can claim its lock
#[derive(Default)]
pub struct SlugThiefRepository {
    inner: InMemoryOrganisationRepository,
    armed: AtomicBool,
}

impl SlugThiefRepository {
    pub fn armed() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryOrganisationRepository::new(),
            armed: AtomicBool::new(true),
        })
    }

    pub fn inner(&self) -> &InMemoryOrganisationRepository {
        &self.inner
    }
}

#[async_trait]
impl OrganisationRepository for SlugThiefRepository {
    async fn save(&self, organisation: Organisation) -> Result<Organisation> {
        self.inner.save(organisation).await
    }

    async fn by_slug(&self, slug: &str) -> Result<Organisation> {
        let result = self.inner.by_slug(slug).await;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.inner
                .save(Organisation::new("Competitor", slug))
                .await?;
        }
        result
    }

    async fn get(&self, id: &str) -> Result<Organisation> {
        self.inner.get(id).await
    }

    async fn delete(&self, organisation: &Organisation) -> Result<()> {
        self.inner.delete(organisation).await
    }
}

/// Organisation repository that replays a stale-read race on update
///
/// The first `get` returns the stored organisation and then renames it to
/// `renamed_to`, so the caller works from a stale slug. The first slug
/// lookup after the second `get` (the one made under lock) runs a
/// competing create for the same slug before returning.
pub struct RenamingOrganisationRepository {
    inner: Arc<InMemoryOrganisationRepository>,
    renamed_to: String,
    gets: AtomicUsize,
    competitor: OrganisationService,
    pending: Mutex<Option<CreateOrganisationCommand>>,
    competitor_result: Mutex<Option<Result<Organisation>>>,
}

impl RenamingOrganisationRepository {
    pub fn new(
        inner: Arc<InMemoryOrganisationRepository>,
        renamed_to: &str,
        competitor: OrganisationService,
        competing_create: CreateOrganisationCommand,
    ) -> Arc<Self> {
        Arc::new(Self {
            inner,
            renamed_to: renamed_to.to_string(),
            gets: AtomicUsize::new(0),
            competitor,
            pending: Mutex::new(Some(competing_create)),
            competitor_result: Mutex::new(None),
        })
    }

    /// Outcome of the competing create, once it has run
    pub fn competitor_result(&self) -> Option<Result<Organisation>> {
        self.competitor_result.lock().unwrap().take()
    }
}

#[async_trait]
impl OrganisationRepository for RenamingOrganisationRepository {
    async fn save(&self, organisation: Organisation) -> Result<Organisation> {
        self.inner.save(organisation).await
    }

    async fn by_slug(&self, slug: &str) -> Result<Organisation> {
        let result = self.inner.by_slug(slug).await;
        if self.gets.load(Ordering::SeqCst) >= 2 {
            let pending = self.pending.lock().unwrap().take();
            if let Some(command) = pending {
                let outcome = self.competitor.create(command).await;
                *self.competitor_result.lock().unwrap() = Some(outcome);
            }
        }
        result
    }

    async fn get(&self, id: &str) -> Result<Organisation> {
        let result = self.inner.get(id).await;
        if self.gets.fetch_add(1, Ordering::SeqCst) == 0 {
            let mut renamed = self.inner.get(id).await?;
            renamed.slug.clone_from(&self.renamed_to);
            self.inner.save(renamed).await?;
        }
        result
    }

    async fn delete(&self, organisation: &Organisation) -> Result<()> {
        self.inner.delete(organisation).await
    }
}

pub fn venue(organisation_id: &str, name: &str, slug: &str) -> Venue {
    Venue {
        id: None,
        organisation_id: organisation_id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        venue_type: VenueType::Hotel,
        address: Address {
            line_1: "1 High Street".to_string(),
            line_2: None,
            municipality: "London".to_string(),
            postcode: "SW1A 1AA".to_string(),
            coordinates: Coordinates {
                lat: 51.5,
                long: 0.12,
            },
        },
    }
}

/// Venue repository where a competitor takes the slug right after the
/// first slug lookup
#[derive(Default)]
pub struct VenueSlugThiefRepository {
    inner: InMemoryVenueRepository,
    armed: AtomicBool,
}

impl VenueSlugThiefRepository {
    pub fn armed() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryVenueRepository::new(),
            armed: AtomicBool::new(true),
        })
    }

    pub fn inner(&self) -> &InMemoryVenueRepository {
        &self.inner
    }
}

#[async_trait]
impl VenueRepository for VenueSlugThiefRepository {
    async fn save(&self, venue: Venue) -> Result<Venue> {
        self.inner.save(venue).await
    }

    async fn by_slug_and_organisation(&self, slug: &str, organisation_id: &str) -> Result<Venue> {
        let result = self.inner.by_slug_and_organisation(slug, organisation_id).await;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.inner
                .save(venue(organisation_id, "Competitor", slug))
                .await?;
        }
        result
    }

    async fn get(&self, id: &str, organisation_id: &str) -> Result<Venue> {
        self.inner.get(id, organisation_id).await
    }

    async fn delete(&self, venue: &Venue) -> Result<()> {
        self.inner.delete(venue).await
    }
}

/// Venue counterpart of [`RenamingOrganisationRepository`]
pub struct RenamingVenueRepository {
    inner: Arc<InMemoryVenueRepository>,
    renamed_to: String,
    gets: AtomicUsize,
    competitor: VenueService,
    pending: Mutex<Option<CreateVenueCommand>>,
    competitor_result: Mutex<Option<Result<Venue>>>,
}

impl RenamingVenueRepository {
    pub fn new(
        inner: Arc<InMemoryVenueRepository>,
        renamed_to: &str,
        competitor: VenueService,
        competing_create: CreateVenueCommand,
    ) -> Arc<Self> {
        Arc::new(Self {
            inner,
            renamed_to: renamed_to.to_string(),
            gets: AtomicUsize::new(0),
            competitor,
            pending: Mutex::new(Some(competing_create)),
            competitor_result: Mutex::new(None),
        })
    }

    pub fn competitor_result(&self) -> Option<Result<Venue>> {
        self.competitor_result.lock().unwrap().take()
    }
}

#[async_trait]
impl VenueRepository for RenamingVenueRepository {
    async fn save(&self, venue: Venue) -> Result<Venue> {
        self.inner.save(venue).await
    }

    async fn by_slug_and_organisation(&self, slug: &str, organisation_id: &str) -> Result<Venue> {
        let result = self.inner.by_slug_and_organisation(slug, organisation_id).await;
        if self.gets.load(Ordering::SeqCst) >= 2 {
            let pending = self.pending.lock().unwrap().take();
            if let Some(command) = pending {
                let outcome = self.competitor.create(command).await;
                *self.competitor_result.lock().unwrap() = Some(outcome);
            }
        }
        result
    }

    async fn get(&self, id: &str, organisation_id: &str) -> Result<Venue> {
        let result = self.inner.get(id, organisation_id).await;
        if self.gets.fetch_add(1, Ordering::SeqCst) == 0 {
            let mut renamed = self.inner.get(id, organisation_id).await?;
            renamed.slug.clone_from(&self.renamed_to);
            self.inner.save(renamed).await?;
        }
        result
    }

    async fn delete(&self, venue: &Venue) -> Result<()> {
        self.inner.delete(venue).await
    }
}

// ============================================================================
// Municipalities
// ============================================================================

pub fn municipality(import_id: i64, country: &str) -> Municipality {
    Municipality {
        name: format!("Town {import_id}"),
        name_ascii: format!("Town {import_id}"),
        lat: 51.0,
        long: 0.5,
        country: country.to_string(),
        iso3: "XXX".to_string(),
        import_id,
    }
}

/// Source returning a fixed set of rows for any location
pub struct StaticSource {
    rows: Vec<Municipality>,
}

impl StaticSource {
    pub fn new(rows: Vec<Municipality>) -> Arc<Self> {
        Arc::new(Self { rows })
    }
}

#[async_trait]
impl MunicipalitySource for StaticSource {
    async fn read_all(&self, location: &str) -> Result<Vec<Municipality>> {
        if location == "missing.csv" {
            return Err(Error::Io {
                message: format!("Failed to open {location}"),
                source: None,
            });
        }
        Ok(self.rows.clone())
    }
}

/// Sink that tracks how many upserts run at once
#[derive(Default)]
pub struct InstrumentedSink {
    store: InMemoryMunicipalityStore,
    delay: Duration,
    active: AtomicUsize,
    max_active: AtomicUsize,
    calls: AtomicUsize,
    batch_sizes: Mutex<Vec<usize>>,
    fail_on: Mutex<Option<i64>>,
}

impl InstrumentedSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::default()
        })
    }

    pub fn store(&self) -> &InMemoryMunicipalityStore {
        &self.store
    }

    /// Fail any batch containing `import_id`
    pub fn fail_on(&self, import_id: Option<i64>) {
        *self.fail_on.lock().unwrap() = import_id;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        let mut sizes = self.batch_sizes.lock().unwrap().clone();
        sizes.sort_unstable();
        sizes
    }
}

#[async_trait]
impl MunicipalitySink for InstrumentedSink {
    async fn upsert_many(&self, rows: &[Municipality]) -> Result<UpsertSummary> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(rows.len());

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let failing = *self.fail_on.lock().unwrap();
        let result = match failing {
            Some(id) if rows.iter().any(|r| r.import_id == id) => {
                Err(Error::database(format!("write failed for import id {id}")))
            }
            _ => self.store.upsert_many(rows).await,
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn provider_name(&self) -> &str {
        "instrumented"
    }
}
