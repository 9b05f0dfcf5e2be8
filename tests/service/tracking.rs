use chrono::Duration;
use hatid::{
    broadcast::ChannelRegistry,
    error::{ConflictError, Error, NotFoundError},
    model::event::{Channel, Event, TrackingStatus},
    service::TrackingService,
};
use hatid_test_utils::prelude::*;
use sea_orm::EntityTrait;

use super::donator;

/// Expect marking to create a tracking pair and publish a
/// tracking-started update on the locations channel
#[tokio::test]
async fn mark_on_the_way_starts_tracking_and_notifies() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = TrackingService::new(&test.db, &channels);

    let request =
        fixtures::insert_active_request(&test.db, "sess-1", "09171234567", "LOC-000000000001")
            .await?;

    let mut events = channels.subscribe(Channel::Locations);
    let pair = service.mark_on_the_way(request.id, &donator(7)).await.unwrap();

    assert_eq!(pair.donator_name, "Maria Santos");
    assert!(pair.is_tracking);
    assert!(!pair.arrived);

    match events.try_recv().unwrap() {
        Event::DonatorTrackingUpdate(update) => {
            assert_eq!(update.request_id, request.id);
            assert_eq!(update.donator_id, 7);
            assert_eq!(update.status, Some(TrackingStatus::TrackingStarted));
            assert_eq!(update.message, "Maria Santos is on the way");
        }
        other => panic!("expected tracking update, got {other:?}"),
    }

    Ok(())
}

/// Expect re-marking the same request to reuse the pair row and reset
/// its arrival state instead of inserting a second one
#[tokio::test]
async fn mark_on_the_way_twice_reuses_the_pair() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = TrackingService::new(&test.db, &channels);

    let request =
        fixtures::insert_active_request(&test.db, "sess-1", "09171234567", "LOC-000000000001")
            .await?;

    let first = service.mark_on_the_way(request.id, &donator(7)).await.unwrap();
    hatid::data::TrackingRepository::new(&test.db)
        .mark_arrived(first.clone())
        .await?;

    let second = service.mark_on_the_way(request.id, &donator(7)).await.unwrap();

    assert_eq!(second.id, first.id);
    assert!(!second.arrived);
    assert!(second.is_tracking);

    let pairs = entity::donator_on_the_way::Entity::find().all(&test.db).await?;
    assert_eq!(pairs.len(), 1);

    Ok(())
}

/// Expect marking toward a fulfilled request to be rejected
#[tokio::test]
async fn mark_on_the_way_rejects_fulfilled_requests() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = TrackingService::new(&test.db, &channels);

    let fulfilled = fixtures::insert_cooldown_request(
        &test.db,
        "sess-done",
        "09171234567",
        "LOC-000000000001",
        fixtures::now() + Duration::hours(1),
    )
    .await?;

    let result = service.mark_on_the_way(fulfilled.id, &donator(7)).await;
    assert!(matches!(
        result,
        Err(Error::Conflict(ConflictError::AlreadyFulfilled))
    ));

    Ok(())
}

/// Expect position samples to require an active tracking pair and to
/// fan out with coordinates once one exists
#[tokio::test]
async fn record_position_requires_active_tracking() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = TrackingService::new(&test.db, &channels);

    let request =
        fixtures::insert_active_request(&test.db, "sess-1", "09171234567", "LOC-000000000001")
            .await?;

    let premature = service
        .record_position(request.id, 7, 14.60, 120.98, 9.0, None)
        .await;
    assert!(matches!(
        premature,
        Err(Error::NotFound(NotFoundError::NoActiveTracking { .. }))
    ));

    service.mark_on_the_way(request.id, &donator(7)).await.unwrap();

    let mut events = channels.subscribe(Channel::Locations);
    let sample = service
        .record_position(request.id, 7, 14.60, 120.98, 9.0, None)
        .await
        .unwrap();

    assert_eq!(sample.latitude, 14.60);
    assert_eq!(sample.longitude, 120.98);

    match events.try_recv().unwrap() {
        Event::DonatorTrackingUpdate(update) => {
            assert_eq!(update.status, None);
            assert_eq!(update.latitude, Some(14.60));
            assert_eq!(update.longitude, Some(120.98));
            assert_eq!(update.accuracy, Some(9.0));
        }
        other => panic!("expected position update, got {other:?}"),
    }

    Ok(())
}

/// Expect stopping to end live tracking while keeping the pair en route
#[tokio::test]
async fn stop_tracking_keeps_the_pair_en_route() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = TrackingService::new(&test.db, &channels);

    let request =
        fixtures::insert_active_request(&test.db, "sess-1", "09171234567", "LOC-000000000001")
            .await?;
    service.mark_on_the_way(request.id, &donator(7)).await.unwrap();

    let mut events = channels.subscribe(Channel::Locations);
    let stopped = service.stop_tracking(request.id, 7).await.unwrap();

    assert!(!stopped.is_tracking);
    assert!(!stopped.arrived);

    match events.try_recv().unwrap() {
        Event::DonatorTrackingUpdate(update) => {
            assert_eq!(update.status, Some(TrackingStatus::TrackingStopped));
        }
        other => panic!("expected tracking-stopped update, got {other:?}"),
    }

    // Further samples are rejected until the donator re-marks.
    let after_stop = service
        .record_position(request.id, 7, 14.61, 120.99, 9.0, None)
        .await;
    assert!(matches!(
        after_stop,
        Err(Error::NotFound(NotFoundError::NoActiveTracking { .. }))
    ));

    Ok(())
}
