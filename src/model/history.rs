use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

/// Public ledger view of one QR-redeemed donation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryView {
    pub id: i32,
    pub donator_id: i64,
    pub donator_name: String,
    pub donator_email: String,
    pub affected_name: String,
    pub affected_phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub supply_needs_fulfilled: Value,
    pub qr_code: String,
    pub donated_at: NaiveDateTime,
}

impl HistoryView {
    pub fn from_model(model: entity::donation_history::Model) -> Self {
        Self {
            id: model.id,
            donator_id: model.donator_id,
            donator_name: model.donator_name,
            donator_email: model.donator_email,
            affected_name: format!("{} {}", model.affected_first_name, model.affected_last_name),
            affected_phone: model.affected_phone,
            latitude: model.latitude,
            longitude: model.longitude,
            supply_needs_fulfilled: model.supply_needs_fulfilled,
            qr_code: model.qr_code,
            donated_at: model.donated_at,
        }
    }
}

/// Per-category quantities the affected person confirmed receiving.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SuppliesReceived {
    pub water: u64,
    pub food: u64,
    pub medical_supplies: u64,
    pub clothing: u64,
    pub shelter_materials: u64,
    pub other_items: String,
    pub all_supplies_received: bool,
}

/// One donation joined with its (possible) confirmation, from the
/// donator's point of view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Acknowledgment {
    pub donation_id: i32,
    pub affected_user: String,
    pub latitude: f64,
    pub longitude: f64,
    pub donated_at: NaiveDateTime,
    pub supplies_donated: Value,
    pub supplies_received: SuppliesReceived,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub rated_at: Option<NaiveDateTime>,
    pub has_confirmation: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AcknowledgmentReport {
    pub total_donations: u64,
    pub acknowledgments: Vec<Acknowledgment>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SupplyTotals {
    pub water: u64,
    pub food: u64,
    pub medical_supplies: u64,
    pub clothing: u64,
    pub shelter_materials: u64,
}

impl SupplyTotals {
    pub fn sum(&self) -> u64 {
        self.water + self.food + self.medical_supplies + self.clothing + self.shelter_materials
    }
}

/// One row of the contributor leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContributorRank {
    pub rank: usize,
    pub donator_id: i64,
    pub donator_name: String,
    pub donator_email: String,
    pub total_donations: u64,
    pub total_people_helped: u64,
    pub average_rating: Option<f64>,
    pub total_ratings: u64,
    pub supplies_promised: SupplyTotals,
    pub supplies_confirmed: SupplyTotals,
    /// Percentage of promised quantities that were confirmed delivered.
    pub supply_fulfillment_rate: f64,
}
