//! Composition root
//!
//! Wires configuration, providers and application services into an
//! [`AppContext`]. All dependencies are injected explicitly; nothing here is
//! global.
//!
//! ```text
//! AppConfig ─┬─> LockService ─> BackoffMutex ─┬─> OrganisationService
//!            │                                └─> VenueService
//!            └─> CsvSource + MunicipalitySink ───> MunicipalitySyncService
//! ShutdownCoordinator ──(child tokens)──> BackoffMutex, MunicipalitySyncService
//! ```

use crate::config::{
    AppConfig, LockConfig, LockProvider, MunicipalityStoreConfig, MunicipalityStoreProvider,
    RedisConfig,
};
use crate::shutdown::ShutdownCoordinator;
use orgs_application::{
    BackoffMutex, MunicipalitySyncInterface, MunicipalitySyncService, OrganisationService,
    OrganisationServiceInterface, RetryPolicy, SyncSettings, VenueService, VenueServiceInterface,
};
use orgs_domain::error::Result;
use orgs_domain::ports::{DistributedMutex, LockService, MunicipalitySink};
use orgs_providers::lock::{InMemoryLockService, RedisLockService};
use orgs_providers::source::CsvMunicipalitySource;
use orgs_providers::store::{
    InMemoryMunicipalityStore, InMemoryOrganisationRepository, InMemoryVenueRepository,
    JsonFileMunicipalityStore,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Application context holding the wired services
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    shutdown: ShutdownCoordinator,
    lock_service: Arc<dyn LockService>,
    mutex: Arc<dyn DistributedMutex>,
    organisations: Arc<dyn OrganisationServiceInterface>,
    venues: Arc<dyn VenueServiceInterface>,
    municipality_sync: Arc<dyn MunicipalitySyncInterface>,
    municipality_store: Arc<dyn MunicipalitySink>,
}

impl AppContext {
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    pub fn lock_service(&self) -> Arc<dyn LockService> {
        Arc::clone(&self.lock_service)
    }

    pub fn mutex(&self) -> Arc<dyn DistributedMutex> {
        Arc::clone(&self.mutex)
    }

    pub fn organisations(&self) -> Arc<dyn OrganisationServiceInterface> {
        Arc::clone(&self.organisations)
    }

    pub fn venues(&self) -> Arc<dyn VenueServiceInterface> {
        Arc::clone(&self.venues)
    }

    pub fn municipality_sync(&self) -> Arc<dyn MunicipalitySyncInterface> {
        Arc::clone(&self.municipality_sync)
    }

    /// Store the sync pipeline writes into
    pub fn municipality_store(&self) -> Arc<dyn MunicipalitySink> {
        Arc::clone(&self.municipality_store)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("lock_provider", &self.lock_service.provider_name())
            .field("store_provider", &self.municipality_store.provider_name())
            .field("shutting_down", &self.shutdown.is_shutting_down())
            .finish_non_exhaustive()
    }
}

/// Build the lock service selected by `lock.provider`
///
/// The redis provider only parses its URL here; it connects on first use.
pub fn build_lock_service(lock: &LockConfig, redis: &RedisConfig) -> Result<Arc<dyn LockService>> {
    let service: Arc<dyn LockService> = match lock.provider {
        LockProvider::Redis => Arc::new(
            RedisLockService::new(&redis.url)?
                .with_key_prefix(lock.key_prefix.clone())
                .with_connection_retries(redis.connection_retries),
        ),
        LockProvider::Memory => Arc::new(InMemoryLockService::new()),
    };
    Ok(service)
}

/// Build the municipality store selected by `store.provider`
pub fn build_municipality_store(store: &MunicipalityStoreConfig) -> Arc<dyn MunicipalitySink> {
    match store.provider {
        MunicipalityStoreProvider::File => Arc::new(JsonFileMunicipalityStore::new(&store.path)),
        MunicipalityStoreProvider::Memory => {
            warn!("Municipality store is in memory; synced rows are discarded on exit");
            Arc::new(InMemoryMunicipalityStore::new())
        }
    }
}

/// Initialize the application context
///
/// Every cancellable component receives a child token of `shutdown`.
pub fn init_app(config: AppConfig, shutdown: ShutdownCoordinator) -> Result<AppContext> {
    let config = Arc::new(config);

    let lock_service = build_lock_service(&config.lock, &config.redis)?;
    info!(
        provider = lock_service.provider_name(),
        ttl_ms = config.lock.ttl_ms,
        "Lock service configured"
    );

    let mutex: Arc<dyn DistributedMutex> = Arc::new(
        BackoffMutex::new(Arc::clone(&lock_service))
            .with_policy(RetryPolicy::linear(
                config.lock.retry_interval(),
                config.lock.retry_attempts,
            ))
            .with_cancellation(shutdown.token()),
    );

    let organisations = Arc::new(
        OrganisationService::new(
            Arc::new(InMemoryOrganisationRepository::new()),
            Arc::clone(&mutex),
        )
        .with_lock_ttl(config.lock.ttl()),
    );
    let venues = Arc::new(
        VenueService::new(Arc::new(InMemoryVenueRepository::new()), Arc::clone(&mutex))
            .with_lock_ttl(config.lock.ttl()),
    );

    let municipality_store = build_municipality_store(&config.municipalities.store);
    info!(
        provider = municipality_store.provider_name(),
        path = %config.municipalities.store.path.display(),
        "Municipality store configured"
    );
    let municipality_sync = Arc::new(
        MunicipalitySyncService::new(
            Arc::new(CsvMunicipalitySource::new()),
            Arc::clone(&municipality_store),
            SyncSettings::from(&config.municipalities.sync),
        )
        .with_cancellation(shutdown.token()),
    );

    info!("Application context initialized");

    Ok(AppContext {
        config,
        shutdown,
        lock_service,
        mutex,
        organisations,
        venues,
        municipality_sync,
        municipality_store,
    })
}
