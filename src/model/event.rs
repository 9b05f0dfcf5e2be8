//! Tagged event payloads published on the broadcast channels.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

/// Logical broadcast channels. `Locations` carries tracking and QR-scan
/// traffic; `Donations` carries generic donation updates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    Locations,
    Donations,
}

/// Wire shape is `{"type": ..., "data": ...}`, matching what the real-time
/// transport relays to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    /// Raw location payload relayed from a connected client.
    LocationUpdate(Value),
    QrScanNotification(QrScanNotification),
    DonatorTrackingUpdate(TrackingUpdate),
    /// Raw donation payload relayed from a connected client.
    DonationUpdate(Value),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    TrackingStarted,
    TrackingStopped,
}

/// En-route status or position sample for one tracking pair. Position
/// events carry coordinates and no status; start/stop events the reverse.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackingUpdate {
    pub request_id: i32,
    pub donator_id: i64,
    pub donator_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    pub message: String,
}

/// Sent to the requester's session when their QR code is redeemed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QrScanNotification {
    pub session_id: String,
    pub donation_history_id: i32,
    pub donator_name: String,
    pub donator_email: String,
    pub supply_needs_fulfilled: Value,
    pub qr_code: String,
    pub donated_at: NaiveDateTime,
}
