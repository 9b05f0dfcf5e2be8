use hatid::service::{HistoryService, RatingService};
use hatid_test_utils::prelude::*;
use serde_json::json;

/// Expect acknowledgments to join each donation with its confirmation
/// when one exists
#[tokio::test]
async fn acknowledgments_join_ratings() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    let rated = fixtures::insert_history(&test.db, 7, "LOC-000000000001").await?;
    fixtures::insert_history(&test.db, 7, "LOC-000000000002").await?;
    fixtures::insert_history(&test.db, 8, "LOC-000000000003").await?;

    RatingService::new(&test.db)
        .rate(
            rated.id,
            "sess-1",
            Some(5),
            Some("Salamat".to_string()),
            &json!({ "water_received": 5, "all_supplies_received": true }),
        )
        .await
        .unwrap();

    let report = HistoryService::new(&test.db).acknowledgments(7).await.unwrap();

    assert_eq!(report.total_donations, 2);
    let confirmed: Vec<_> = report
        .acknowledgments
        .iter()
        .filter(|ack| ack.has_confirmation)
        .collect();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].donation_id, rated.id);
    assert_eq!(confirmed[0].rating, Some(5));
    assert_eq!(confirmed[0].supplies_received.water, 5);
    assert!(confirmed[0].supplies_received.all_supplies_received);

    let unconfirmed = report
        .acknowledgments
        .iter()
        .find(|ack| !ack.has_confirmation)
        .unwrap();
    assert_eq!(unconfirmed.rating, None);
    assert_eq!(unconfirmed.supplies_received.water, 0);

    Ok(())
}

/// Expect the leaderboard to rank by donation count and report
/// fulfilment against confirmed quantities
#[tokio::test]
async fn contributor_ranking_orders_and_scores() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    // Donator 7: two donations, one rated. Donator 8: one donation.
    let first = fixtures::insert_history(&test.db, 7, "LOC-000000000001").await?;
    fixtures::insert_history(&test.db, 7, "LOC-000000000002").await?;
    fixtures::insert_history(&test.db, 8, "LOC-000000000003").await?;

    RatingService::new(&test.db)
        .rate(
            first.id,
            "sess-1",
            Some(4),
            None,
            &json!({ "water_received": 4, "food_received": 3 }),
        )
        .await
        .unwrap();

    let ranking = HistoryService::new(&test.db).contributor_ranking(10).await.unwrap();

    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].donator_id, 7);
    assert_eq!(ranking[0].rank, 1);
    assert_eq!(ranking[0].total_donations, 2);
    assert_eq!(ranking[0].average_rating, Some(4.0));
    assert_eq!(ranking[0].total_ratings, 1);
    // The rated entry's snapshot was overwritten to {water:4, food:3};
    // the unrated one still promises {water:5, food:3}.
    assert_eq!(ranking[0].supplies_promised.water, 9);
    assert_eq!(ranking[0].supplies_promised.food, 6);
    assert_eq!(ranking[0].supplies_confirmed.water, 4);
    assert_eq!(ranking[0].supplies_confirmed.food, 3);
    assert!(ranking[0].supply_fulfillment_rate > 0.0);

    assert_eq!(ranking[1].donator_id, 8);
    assert_eq!(ranking[1].total_donations, 1);
    assert_eq!(ranking[1].average_rating, None);
    // Nothing confirmed yet against promised supplies.
    assert_eq!(ranking[1].supply_fulfillment_rate, 0.0);

    Ok(())
}

/// Expect the limit to cap the leaderboard
#[tokio::test]
async fn contributor_ranking_honors_the_limit() -> Result<(), TestError> {
    let test = test_setup_with_relief_tables!()?;

    fixtures::insert_history(&test.db, 7, "LOC-000000000001").await?;
    fixtures::insert_history(&test.db, 8, "LOC-000000000002").await?;
    fixtures::insert_history(&test.db, 9, "LOC-000000000003").await?;

    let ranking = HistoryService::new(&test.db).contributor_ranking(2).await.unwrap();

    assert_eq!(ranking.len(), 2);

    Ok(())
}
