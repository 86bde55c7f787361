//! Tests for uniqueness-guarded venue mutations

use crate::test_utils::{
    CountingLockService, RenamingVenueRepository, VenueSlugThiefRepository, fast_mutex, venue,
};
use orgs_application::{CreateVenueCommand, UpdateVenueCommand, VenueService, VenueServiceInterface};
use orgs_domain::constants::{CONFLICT_SLUG_IN_USE, CONFLICT_VENUE_EDITING};
use orgs_domain::entities::{Venue, VenueType};
use orgs_domain::error::{Error, ErrorKind};
use orgs_domain::ports::VenueRepository;
use orgs_providers::store::InMemoryVenueRepository;
use std::sync::Arc;

struct Fixture {
    service: VenueService,
    repository: Arc<InMemoryVenueRepository>,
    locks: Arc<CountingLockService>,
}

fn fixture() -> Fixture {
    let repository = Arc::new(InMemoryVenueRepository::new());
    let locks = CountingLockService::new();
    let service = VenueService::new(repository.clone(), fast_mutex(&locks));
    Fixture {
        service,
        repository,
        locks,
    }
}

fn command(organisation_id: &str, slug: &str) -> CreateVenueCommand {
    CreateVenueCommand {
        organisation_id: Some(organisation_id.to_string()),
        name: Some("Grand Hotel".to_string()),
        slug: Some(slug.to_string()),
        venue_type: Some("hotel".to_string()),
        address_line_1: Some("1 High Street".to_string()),
        address_line_2: Some("Floor 2".to_string()),
        municipality: Some("London".to_string()),
        postcode: Some("SW1A 1AA".to_string()),
        lat: Some(51.5),
        long: Some(0.12),
    }
}

async fn create(f: &Fixture, organisation_id: &str, slug: &str) -> Venue {
    f.service
        .create(command(organisation_id, slug))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_builds_venue() {
    let f = fixture();

    let venue = create(&f, "org-1", "grand").await;

    assert!(venue.id.is_some());
    assert_eq!(venue.organisation_id, "org-1");
    assert_eq!(venue.venue_type, VenueType::Hotel);
    assert_eq!(venue.address.line_2.as_deref(), Some("Floor 2"));
    assert_eq!(venue.address.postcode, "SW1A 1AA");
    assert_eq!(f.locks.obtained(), vec!["venue_slug:org-1:grand"]);
    assert!(!f.locks.inner().is_held("venue_slug:org-1:grand"));
}

#[tokio::test]
async fn test_slug_is_unique_per_organisation() {
    let f = fixture();
    create(&f, "org-1", "grand").await;

    // Same slug in another organisation is fine
    create(&f, "org-2", "grand").await;

    let err = f.service.create(command("org-1", "grand")).await.unwrap_err();
    match err {
        Error::Validation(errors) => assert!(errors.is_not_unique("slug")),
        other => panic!("expected uniqueness failure, got {other:?}"),
    }
    assert_eq!(f.repository.len().await, 2);
}

#[tokio::test]
async fn test_create_conflict_when_slug_lock_held() {
    let f = fixture();
    f.locks.hold_elsewhere("venue_slug:org-1:grand").await;

    let err = f.service.create(command("org-1", "grand")).await.unwrap_err();

    match err {
        Error::Conflict { message } => assert_eq!(message, CONFLICT_SLUG_IN_USE),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_rejects_invalid_command() {
    let f = fixture();
    let invalid = CreateVenueCommand {
        lat: Some(-3.0),
        ..command("org-1", "grand")
    };

    let err = f.service.create(invalid).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(f.locks.attempts(), 0);
}

#[tokio::test]
async fn test_update_applies_fields_and_keeps_type() {
    let f = fixture();
    let venue = create(&f, "org-1", "grand").await;
    let id = venue.id.clone().unwrap();

    let updated = f
        .service
        .update(UpdateVenueCommand {
            name: Some("Grand Hotel & Spa".to_string()),
            slug: Some("grand-spa".to_string()),
            nullify_address_line_2: true,
            address_line_2: Some("ignored".to_string()),
            postcode: Some("M1 1AE".to_string()),
            lat: Some(53.48),
            ..UpdateVenueCommand::new(&id, "org-1")
        })
        .await
        .unwrap();

    assert_eq!(updated.name, "Grand Hotel & Spa");
    assert_eq!(updated.slug, "grand-spa");
    assert_eq!(updated.venue_type, VenueType::Hotel);
    assert_eq!(updated.address.line_2, None);
    assert_eq!(updated.address.postcode, "M1 1AE");
    assert!((updated.address.coordinates.lat - 53.48).abs() < f64::EPSILON);
    assert!((updated.address.coordinates.long - 0.12).abs() < f64::EPSILON);
    assert_eq!(
        f.locks.obtained()[1..],
        [
            format!("venue_edit:{id}"),
            "venue_slug:org-1:grand-spa".to_string()
        ]
    );
}

#[tokio::test]
async fn test_update_sets_address_line_2() {
    let f = fixture();
    let venue = create(&f, "org-1", "grand").await;

    let updated = f
        .service
        .update(UpdateVenueCommand {
            address_line_2: Some("Suite 9".to_string()),
            ..UpdateVenueCommand::new(venue.id.unwrap(), "org-1")
        })
        .await
        .unwrap();

    assert_eq!(updated.address.line_2.as_deref(), Some("Suite 9"));
}

#[tokio::test]
async fn test_update_rejects_slug_taken_in_same_organisation() {
    let f = fixture();
    create(&f, "org-1", "grand").await;
    let other = create(&f, "org-1", "royal").await;

    let err = f
        .service
        .update(UpdateVenueCommand {
            slug: Some("grand".to_string()),
            ..UpdateVenueCommand::new(other.id.unwrap(), "org-1")
        })
        .await
        .unwrap_err();

    match err {
        Error::Validation(errors) => assert!(errors.is_not_unique("slug")),
        other => panic!("expected uniqueness failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_conflict_while_edited_elsewhere() {
    let f = fixture();
    let venue = create(&f, "org-1", "grand").await;
    let id = venue.id.unwrap();
    f.locks.hold_elsewhere(&format!("venue_edit:{id}")).await;

    let err = f
        .service
        .update(UpdateVenueCommand {
            name: Some("Renamed".to_string()),
            ..UpdateVenueCommand::new(&id, "org-1")
        })
        .await
        .unwrap_err();

    match err {
        Error::Conflict { message } => assert_eq!(message, CONFLICT_VENUE_EDITING),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_and_delete_are_scoped_to_organisation() {
    let f = fixture();
    let venue = create(&f, "org-1", "grand").await;
    let id = venue.id.clone().unwrap();

    assert!(f.service.get(&id, "org-2").await.unwrap_err().is_not_found());
    assert!(f.service.delete(&id, "org-2").await.unwrap_err().is_not_found());
    assert_eq!(f.service.get(&id, "org-1").await.unwrap(), venue);

    f.service.delete(&id, "org-1").await.unwrap();
    assert!(f.repository.is_empty().await);
}

#[tokio::test]
async fn test_create_rechecks_slug_inside_lock() {
    let repository = VenueSlugThiefRepository::armed();
    let locks = CountingLockService::new();
    let service = VenueService::new(repository.clone(), fast_mutex(&locks));

    let err = service.create(command("org-1", "grand")).await.unwrap_err();

    match err {
        Error::Validation(errors) => assert!(errors.is_not_unique("slug")),
        other => panic!("expected uniqueness failure, got {other:?}"),
    }
    let holders = repository.inner().all_with_slug("org-1", "grand").await;
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].name, "Competitor");
    assert!(!locks.inner().is_held("venue_slug:org-1:grand"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_slug_only_one_succeeds() {
    let repository = Arc::new(InMemoryVenueRepository::new());
    let locks = CountingLockService::new();
    let service = Arc::new(VenueService::new(repository.clone(), fast_mutex(&locks)));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create(command("org-1", "grand")).await })
        })
        .collect();

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(Error::Validation(errors)) => assert!(errors.is_not_unique("slug")),
            Err(Error::Conflict { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(repository.all_with_slug("org-1", "grand").await.len(), 1);
}

#[tokio::test]
async fn test_update_claims_slug_lock_when_read_is_stale() {
    let inner = Arc::new(InMemoryVenueRepository::new());
    let locks = CountingLockService::new();
    let target = inner.save(venue("org-1", "Grand", "alpha")).await.unwrap();
    let id = target.id.unwrap();

    // Renamed to "beta" by another edit between the read and the claim,
    // then a create for "alpha" races the in-lock re-check
    let competitor = VenueService::new(inner.clone(), fast_mutex(&locks));
    let repository =
        RenamingVenueRepository::new(inner.clone(), "beta", competitor, command("org-1", "alpha"));
    let service = VenueService::new(repository.clone(), fast_mutex(&locks));

    let updated = service
        .update(UpdateVenueCommand {
            slug: Some("alpha".to_string()),
            ..UpdateVenueCommand::new(&id, "org-1")
        })
        .await
        .unwrap();

    assert_eq!(updated.slug, "alpha");
    let competing = repository.competitor_result().expect("competing create ran");
    match competing.unwrap_err() {
        Error::Conflict { message } => assert_eq!(message, CONFLICT_SLUG_IN_USE),
        other => panic!("expected conflict, got {other:?}"),
    }

    let holders = inner.all_with_slug("org-1", "alpha").await;
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].id.as_deref(), Some(id.as_str()));
    assert!(!locks.inner().is_held("venue_slug:org-1:alpha"));
}
