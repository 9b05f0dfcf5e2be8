use hatid::{
    error::{ConflictError, Error, NotFoundError, ValidationError},
    service::RatingService,
};
use hatid_test_utils::prelude::*;
use sea_orm::EntityTrait;
use serde_json::json;

/// Expect a rating with confirmed supplies to overwrite the ledger
/// entry with the confirmed view
#[tokio::test]
async fn rating_overwrites_the_ledger_snapshot() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let service = RatingService::new(&test.db);

    let entry = fixtures::insert_history(&test.db, 7, "LOC-000000000001").await?;

    let confirmed = json!({
        "water_received": 5,
        "food_received": 2,
        "clothing_received": 0,
        "other_items": "blankets",
        "all_supplies_received": false
    });
    let record = service
        .rate(entry.id, "sess-1", Some(4), Some("Salamat po".to_string()), &confirmed)
        .await
        .unwrap();

    assert_eq!(record.rating, Some(4));
    assert_eq!(record.comment.as_deref(), Some("Salamat po"));

    // Zero counts drop out and other_items maps back to other.
    let updated = entity::donation_history::Entity::find_by_id(entry.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(
        updated.supply_needs_fulfilled,
        json!({ "water": 5, "food": 2, "other": "blankets" })
    );

    Ok(())
}

/// Expect an empty confirmation to leave the snapshot untouched
#[tokio::test]
async fn empty_confirmation_keeps_the_snapshot() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let service = RatingService::new(&test.db);

    let entry = fixtures::insert_history(&test.db, 7, "LOC-000000000001").await?;
    let before = entry.supply_needs_fulfilled.clone();

    service
        .rate(entry.id, "sess-1", Some(5), None, &json!({}))
        .await
        .unwrap();

    let after = entity::donation_history::Entity::find_by_id(entry.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(after.supply_needs_fulfilled, before);

    Ok(())
}

/// Expect at most one rating per donation
#[tokio::test]
async fn duplicate_ratings_are_rejected() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let service = RatingService::new(&test.db);

    let entry = fixtures::insert_history(&test.db, 7, "LOC-000000000001").await?;

    service
        .rate(entry.id, "sess-1", Some(5), None, &json!({}))
        .await
        .unwrap();

    let second = service.rate(entry.id, "sess-1", Some(1), None, &json!({})).await;
    assert!(matches!(
        second,
        Err(Error::Conflict(ConflictError::DuplicateRating(_)))
    ));

    Ok(())
}

/// Expect star values outside 1..=5 and unknown donations to be
/// rejected
#[tokio::test]
async fn rejects_invalid_ratings() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;
    let service = RatingService::new(&test.db);

    let entry = fixtures::insert_history(&test.db, 7, "LOC-000000000001").await?;

    for stars in [0, 6] {
        let result = service.rate(entry.id, "sess-1", Some(stars), None, &json!({})).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::RatingOutOfRange(_)))
        ));
    }

    let unknown = service.rate(entry.id + 100, "sess-1", Some(3), None, &json!({})).await;
    assert!(matches!(
        unknown,
        Err(Error::NotFound(NotFoundError::DonationHistory(_)))
    ));

    Ok(())
}
