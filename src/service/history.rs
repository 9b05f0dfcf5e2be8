use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::{
    data::{DonationHistoryRepository, DonationRatingRepository},
    error::Error,
    model::{
        history::{
            Acknowledgment, AcknowledgmentReport, ContributorRank, HistoryView, SuppliesReceived,
            SupplyTotals,
        },
        supply::SuppliesConfirmed,
    },
};

pub struct HistoryService<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Default)]
struct Contribution {
    donator_name: String,
    donator_email: String,
    total_donations: u64,
    total_people_helped: u64,
    rating_sum: i64,
    total_ratings: u64,
    supplies_promised: SupplyTotals,
    supplies_confirmed: SupplyTotals,
}

impl<'a> HistoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Public donation ledger, newest first.
    pub async fn list(&self) -> Result<Vec<HistoryView>, Error> {
        let entries = DonationHistoryRepository::new(self.db).list().await?;

        Ok(entries.into_iter().map(HistoryView::from_model).collect())
    }

    pub async fn list_by_donator(&self, donator_id: i64) -> Result<Vec<HistoryView>, Error> {
        let entries = DonationHistoryRepository::new(self.db)
            .list_by_donator(donator_id)
            .await?;

        Ok(entries.into_iter().map(HistoryView::from_model).collect())
    }

    /// One donator's donations joined with whatever confirmations the
    /// affected persons have submitted so far.
    pub async fn acknowledgments(&self, donator_id: i64) -> Result<AcknowledgmentReport, Error> {
        let entries = DonationHistoryRepository::new(self.db)
            .list_by_donator(donator_id)
            .await?;

        let history_ids: Vec<i32> = entries.iter().map(|entry| entry.id).collect();
        let mut ratings: HashMap<i32, entity::donation_rating::Model> =
            DonationRatingRepository::new(self.db)
                .list_for_histories(history_ids)
                .await?
                .into_iter()
                .map(|rating| (rating.donation_history_id, rating))
                .collect();

        let acknowledgments = entries
            .into_iter()
            .map(|entry| {
                let rating = ratings.remove(&entry.id);
                let received = rating
                    .as_ref()
                    .map(|rating| supplies_received(&rating.supplies_confirmed))
                    .unwrap_or_default();

                Acknowledgment {
                    donation_id: entry.id,
                    affected_user: format!(
                        "{} {}",
                        entry.affected_first_name, entry.affected_last_name
                    ),
                    latitude: entry.latitude,
                    longitude: entry.longitude,
                    donated_at: entry.donated_at,
                    supplies_donated: entry.supply_needs_fulfilled,
                    supplies_received: received,
                    rating: rating.as_ref().and_then(|rating| rating.rating),
                    comment: rating.as_ref().and_then(|rating| rating.comment.clone()),
                    rated_at: rating.as_ref().map(|rating| rating.rated_at),
                    has_confirmation: rating.is_some(),
                }
            })
            .collect::<Vec<_>>();

        Ok(AcknowledgmentReport {
            total_donations: acknowledgments.len() as u64,
            acknowledgments,
        })
    }

    /// Donator leaderboard across the whole ledger.
    ///
    /// Contributors are ranked by donation count (ties broken by donator
    /// id), carrying per-category totals of what they promised and what
    /// the affected persons confirmed, the resulting fulfilment rate,
    /// and their average star rating.
    pub async fn contributor_ranking(&self, limit: usize) -> Result<Vec<ContributorRank>, Error> {
        let entries = DonationHistoryRepository::new(self.db).list().await?;

        let history_ids: Vec<i32> = entries.iter().map(|entry| entry.id).collect();
        let ratings: HashMap<i32, entity::donation_rating::Model> =
            DonationRatingRepository::new(self.db)
                .list_for_histories(history_ids)
                .await?
                .into_iter()
                .map(|rating| (rating.donation_history_id, rating))
                .collect();

        let mut contributions: HashMap<i64, Contribution> = HashMap::new();
        for entry in entries {
            let contribution = contributions.entry(entry.donator_id).or_default();
            if contribution.donator_name.is_empty() {
                contribution.donator_name = entry.donator_name.clone();
                contribution.donator_email = entry.donator_email.clone();
            }

            contribution.total_donations += 1;
            contribution.total_people_helped +=
                count_field(&entry.supply_needs_fulfilled, "people_count");
            add_promised(
                &mut contribution.supplies_promised,
                &entry.supply_needs_fulfilled,
            );

            if let Some(rating) = ratings.get(&entry.id) {
                if let Some(stars) = rating.rating {
                    contribution.rating_sum += i64::from(stars);
                    contribution.total_ratings += 1;
                }
                add_confirmed(
                    &mut contribution.supplies_confirmed,
                    &rating.supplies_confirmed,
                );
            }
        }

        let mut ranking: Vec<(i64, Contribution)> = contributions.into_iter().collect();
        ranking.sort_by(|(id_a, a), (id_b, b)| {
            b.total_donations
                .cmp(&a.total_donations)
                .then(id_a.cmp(id_b))
        });
        ranking.truncate(limit);

        Ok(ranking
            .into_iter()
            .enumerate()
            .map(|(index, (donator_id, contribution))| {
                let average_rating = (contribution.total_ratings > 0).then(|| {
                    round_one(contribution.rating_sum as f64 / contribution.total_ratings as f64)
                });

                ContributorRank {
                    rank: index + 1,
                    donator_id,
                    donator_name: contribution.donator_name,
                    donator_email: contribution.donator_email,
                    total_donations: contribution.total_donations,
                    total_people_helped: contribution.total_people_helped,
                    average_rating,
                    total_ratings: contribution.total_ratings,
                    supply_fulfillment_rate: fulfillment_rate(
                        &contribution.supplies_promised,
                        &contribution.supplies_confirmed,
                    ),
                    supplies_promised: contribution.supplies_promised,
                    supplies_confirmed: contribution.supplies_confirmed,
                }
            })
            .collect())
    }
}

/// Reads one count out of a stored supply JSON object. Counts were
/// validated on the way in, so anything unreadable counts as zero.
fn count_field(value: &Value, field: &str) -> u64 {
    match value.get(field) {
        Some(Value::Number(number)) => number.as_u64().unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn add_promised(totals: &mut SupplyTotals, needs: &Value) {
    totals.water += count_field(needs, "water");
    totals.food += count_field(needs, "food");
    totals.medical_supplies += count_field(needs, "medical_supplies");
    totals.clothing += count_field(needs, "clothing");
    totals.shelter_materials += count_field(needs, "shelter_materials");
}

fn add_confirmed(totals: &mut SupplyTotals, confirmed: &Value) {
    totals.water += count_field(confirmed, "water_received");
    totals.food += count_field(confirmed, "food_received");
    totals.medical_supplies += count_field(confirmed, "medical_supplies_received");
    totals.clothing += count_field(confirmed, "clothing_received");
    totals.shelter_materials += count_field(confirmed, "shelter_materials_received");
}

fn supplies_received(confirmed: &Value) -> SuppliesReceived {
    let parsed = SuppliesConfirmed::parse(confirmed).unwrap_or_default();

    SuppliesReceived {
        water: u64::from(parsed.water_received.unwrap_or(0)),
        food: u64::from(parsed.food_received.unwrap_or(0)),
        medical_supplies: u64::from(parsed.medical_supplies_received.unwrap_or(0)),
        clothing: u64::from(parsed.clothing_received.unwrap_or(0)),
        shelter_materials: u64::from(parsed.shelter_materials_received.unwrap_or(0)),
        other_items: parsed.other_items.unwrap_or_default(),
        all_supplies_received: parsed.all_supplies_received.unwrap_or(false),
    }
}

/// Percentage of promised quantities confirmed delivered, one decimal.
/// A donator with nothing promised scores 100 unless confirmations
/// appeared out of thin air.
fn fulfillment_rate(promised: &SupplyTotals, confirmed: &SupplyTotals) -> f64 {
    if promised.sum() == 0 {
        return if confirmed.sum() == 0 { 100.0 } else { 0.0 };
    }

    round_one(confirmed.sum() as f64 / promised.sum() as f64 * 100.0)
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
