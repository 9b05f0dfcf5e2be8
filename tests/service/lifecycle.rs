use hatid::{
    error::{ConflictError, Error},
    model::event::{Channel, Event},
    model::AppState,
};
use hatid_test_utils::prelude::*;
use sea_orm::EntityTrait;
use serde_json::json;

use super::{donator, submission};

/// Full donation lifecycle: an affected person requests, a donator marks
/// themselves en route, the QR is scanned, the affected person confirms
/// what arrived, and the phone enters its cool-down.
#[tokio::test]
async fn request_to_rating_lifecycle() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let state = AppState::new(test.db.clone());

    // The affected person asks for water and food.
    let view = state
        .requests()
        .submit(submission("sess-affected", "09171234567"))
        .await
        .unwrap();
    assert_eq!(view.supply_needs, json!({ "water": 5, "food": 3 }));

    // A donator sets out; the request now lists them as en route.
    state
        .tracking()
        .mark_on_the_way(view.id, &donator(7))
        .await
        .unwrap();
    for (latitude, longitude) in [(14.5548, 121.0244), (14.5672, 121.0105), (14.5831, 120.9964)] {
        state
            .tracking()
            .record_position(view.id, 7, latitude, longitude, 15.0, None)
            .await
            .unwrap();
    }
    let trail = entity::location_update::Entity::find().all(&test.db).await?;
    assert_eq!(trail.len(), 3);

    let active = state.requests().list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].donators_on_the_way.len(), 1);
    assert_eq!(active[0].donators_on_the_way[0].donator_id, 7);

    // Handover: the donator scans the QR code.
    let mut events = state.channels.subscribe(Channel::Locations);
    let entry = state
        .redemption()
        .redeem(&view.qr_code, &donator(7))
        .await
        .unwrap();

    let notification = match events.try_recv().unwrap() {
        Event::QrScanNotification(notification) => notification,
        other => panic!("expected QR scan notification, got {other:?}"),
    };
    assert_eq!(notification.session_id, "sess-affected");

    // The fulfilled request leaves the active map.
    assert!(state.requests().list_active().await.unwrap().is_empty());

    // The same phone cannot request again during the cool-down.
    let blocked = state
        .requests()
        .submit(submission("sess-other", "09171234567"))
        .await;
    assert!(matches!(
        blocked,
        Err(Error::Conflict(ConflictError::CooldownActive { .. }))
    ));

    // The affected person confirms what actually arrived.
    state
        .ratings()
        .rate(
            notification.donation_history_id,
            "sess-affected",
            Some(5),
            Some("Maraming salamat".to_string()),
            &json!({ "water_received": 5, "food_received": 2 }),
        )
        .await
        .unwrap();

    // The ledger now shows the confirmed quantities, not the promise.
    let ledger = state.history().list().await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].id, entry.id);
    assert_eq!(
        ledger[0].supply_needs_fulfilled,
        json!({ "water": 5, "food": 2 })
    );

    // And the donator's acknowledgments reflect the confirmation.
    let report = state.history().acknowledgments(7).await.unwrap();
    assert_eq!(report.total_donations, 1);
    assert!(report.acknowledgments[0].has_confirmation);
    assert_eq!(report.acknowledgments[0].supplies_received.water, 5);
    assert_eq!(report.acknowledgments[0].supplies_received.food, 2);

    Ok(())
}
