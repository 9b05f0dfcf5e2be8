use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound submission payload for an affected person's relief request.
/// `session_id` is the opaque token that keys create-or-update; `phone`
/// gates the post-donation cool-down.
#[derive(Clone, Debug, Deserialize)]
pub struct NewRequest {
    pub session_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub facebook: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub photo_ref: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    /// Untyped on purpose; validated into a
    /// [`crate::model::supply::SupplyNeeds`] before anything is written.
    pub supply_needs: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnRouteDonator {
    pub donator_id: i64,
    pub name: String,
    pub email: String,
    pub marked_at: NaiveDateTime,
}

/// Outbound view of a request, including the donators currently en route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub facebook: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub photo_ref: Option<String>,
    pub supply_needs: Value,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub session_id: String,
    pub qr_code: String,
    pub is_active: bool,
    pub donation_received: bool,
    pub donated_by_name: Option<String>,
    pub donation_timestamp: Option<NaiveDateTime>,
    pub next_request_allowed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub last_seen: NaiveDateTime,
    pub donators_on_the_way: Vec<EnRouteDonator>,
}

impl RequestView {
    pub fn from_model(
        model: entity::affected_request::Model,
        en_route: Vec<entity::donator_on_the_way::Model>,
    ) -> Self {
        let donators_on_the_way = en_route
            .into_iter()
            .map(|record| EnRouteDonator {
                donator_id: record.donator_id,
                name: record.donator_name,
                email: record.donator_email,
                marked_at: record.marked_at,
            })
            .collect();

        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            facebook: model.facebook,
            email: model.email,
            notes: model.notes,
            photo_ref: model.photo_ref,
            supply_needs: model.supply_needs,
            latitude: model.latitude,
            longitude: model.longitude,
            accuracy: model.accuracy,
            session_id: model.session_id,
            qr_code: model.qr_code,
            is_active: model.is_active,
            donation_received: model.donation_received,
            donated_by_name: model.donated_by_name,
            donation_timestamp: model.donation_timestamp,
            next_request_allowed_at: model.next_request_allowed_at,
            created_at: model.created_at,
            last_seen: model.last_seen,
            donators_on_the_way,
        }
    }
}
