use chrono::Duration;
use hatid::{
    broadcast::ChannelRegistry,
    error::{ConflictError, Error, NotFoundError},
    model::event::{Channel, Event},
    service::{HistoryService, RedemptionService, TrackingService},
};
use hatid_test_utils::prelude::*;
use sea_orm::EntityTrait;

use super::donator;

/// Expect a scan to fulfil the request, start the cool-down, and write
/// exactly one ledger entry
#[tokio::test]
async fn redeem_fulfils_the_request_once() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = RedemptionService::new(&test.db, &channels);

    let request =
        fixtures::insert_active_request(&test.db, "sess-1", "09171234567", "LOC-000000000001")
            .await?;

    let entry = service.redeem("LOC-000000000001", &donator(7)).await.unwrap();
    assert_eq!(entry.donator_name, "Maria Santos");
    assert_eq!(entry.affected_name, "Juan Dela Cruz");
    assert_eq!(entry.qr_code, "LOC-000000000001");

    let row = entity::affected_request::Entity::find_by_id(request.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert!(row.donation_received);
    assert!(!row.is_active);
    assert_eq!(row.donated_by, Some(7));
    let deadline = row.next_request_allowed_at.unwrap();
    assert_eq!(deadline, row.donation_timestamp.unwrap() + Duration::hours(3));

    // The code is spent; a second scan conflicts and adds nothing.
    let second = service.redeem("LOC-000000000001", &donator(8)).await;
    assert!(matches!(
        second,
        Err(Error::Conflict(ConflictError::AlreadyFulfilled))
    ));

    let ledger = HistoryService::new(&test.db).list().await.unwrap();
    assert_eq!(ledger.len(), 1);

    Ok(())
}

/// Expect an unknown code to be a not-found error
#[tokio::test]
async fn redeem_rejects_unknown_codes() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = RedemptionService::new(&test.db, &channels);

    let result = service.redeem("LOC-FFFFFFFFFFFF", &donator(7)).await;
    assert!(matches!(
        result,
        Err(Error::NotFound(NotFoundError::QrCode(_)))
    ));

    Ok(())
}

/// Expect the scanning donator's en-route pair to flip to arrived while
/// the location stream stays open
#[tokio::test]
async fn redeem_marks_the_tracking_pair_arrived() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();

    let request =
        fixtures::insert_active_request(&test.db, "sess-1", "09171234567", "LOC-000000000001")
            .await?;
    let tracking = TrackingService::new(&test.db, &channels);
    tracking.mark_on_the_way(request.id, &donator(7)).await.unwrap();

    RedemptionService::new(&test.db, &channels)
        .redeem("LOC-000000000001", &donator(7))
        .await
        .unwrap();

    let pair = entity::donator_on_the_way::Entity::find()
        .one(&test.db)
        .await?
        .unwrap();
    assert!(pair.arrived);
    assert!(pair.is_tracking);

    // Arrival does not close the stream; samples land until the donator
    // stops sharing.
    tracking.record_position(request.id, 7, 14.6010, 120.9850, 9.0, None).await.unwrap();
    tracking.stop_tracking(request.id, 7).await.unwrap();
    let result = tracking.record_position(request.id, 7, 14.6011, 120.9851, 9.0, None).await;
    assert!(result.is_err());

    Ok(())
}

/// Expect the requester's session to be notified after commit
#[tokio::test]
async fn redeem_notifies_the_requester_session() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let channels = ChannelRegistry::new();
    let service = RedemptionService::new(&test.db, &channels);

    fixtures::insert_active_request(&test.db, "sess-1", "09171234567", "LOC-000000000001").await?;

    let mut events = channels.subscribe(Channel::Locations);
    let entry = service.redeem("LOC-000000000001", &donator(7)).await.unwrap();

    match events.try_recv().unwrap() {
        Event::QrScanNotification(notification) => {
            assert_eq!(notification.session_id, "sess-1");
            assert_eq!(notification.donation_history_id, entry.id);
            assert_eq!(notification.qr_code, "LOC-000000000001");
        }
        other => panic!("expected QR scan notification, got {other:?}"),
    }

    Ok(())
}
