//! Insert helpers and sample payloads shared across tests.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};
use serde_json::{json, Value};

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Minimal valid supply-needs payload.
pub fn supply_needs(water: u32, food: u32) -> Value {
    json!({ "water": water, "food": food })
}

/// Inserts an active affected request with sensible defaults.
pub async fn insert_active_request<C: ConnectionTrait>(
    db: &C,
    session_id: &str,
    phone: &str,
    qr_code: &str,
) -> Result<entity::affected_request::Model, DbErr> {
    let timestamp = now();

    entity::affected_request::ActiveModel {
        first_name: ActiveValue::Set("Juan".to_string()),
        last_name: ActiveValue::Set("Dela Cruz".to_string()),
        phone: ActiveValue::Set(phone.to_string()),
        facebook: ActiveValue::Set(None),
        email: ActiveValue::Set(None),
        notes: ActiveValue::Set(None),
        photo_ref: ActiveValue::Set(Some("photos/sample.jpg".to_string())),
        supply_needs: ActiveValue::Set(supply_needs(5, 3)),
        latitude: ActiveValue::Set(14.5995),
        longitude: ActiveValue::Set(120.9842),
        accuracy: ActiveValue::Set(Some(12.0)),
        session_id: ActiveValue::Set(session_id.to_string()),
        qr_code: ActiveValue::Set(qr_code.to_string()),
        is_active: ActiveValue::Set(true),
        donation_received: ActiveValue::Set(false),
        donated_by: ActiveValue::Set(None),
        donated_by_name: ActiveValue::Set(None),
        donation_timestamp: ActiveValue::Set(None),
        next_request_allowed_at: ActiveValue::Set(None),
        created_at: ActiveValue::Set(timestamp),
        updated_at: ActiveValue::Set(timestamp),
        last_seen: ActiveValue::Set(timestamp),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts a fulfilled request whose phone is still inside the cool-down
/// window ending at `next_allowed_at`.
pub async fn insert_cooldown_request<C: ConnectionTrait>(
    db: &C,
    session_id: &str,
    phone: &str,
    qr_code: &str,
    next_allowed_at: NaiveDateTime,
) -> Result<entity::affected_request::Model, DbErr> {
    let timestamp = now();

    entity::affected_request::ActiveModel {
        first_name: ActiveValue::Set("Juan".to_string()),
        last_name: ActiveValue::Set("Dela Cruz".to_string()),
        phone: ActiveValue::Set(phone.to_string()),
        facebook: ActiveValue::Set(None),
        email: ActiveValue::Set(None),
        notes: ActiveValue::Set(None),
        photo_ref: ActiveValue::Set(None),
        supply_needs: ActiveValue::Set(supply_needs(1, 1)),
        latitude: ActiveValue::Set(14.5995),
        longitude: ActiveValue::Set(120.9842),
        accuracy: ActiveValue::Set(None),
        session_id: ActiveValue::Set(session_id.to_string()),
        qr_code: ActiveValue::Set(qr_code.to_string()),
        is_active: ActiveValue::Set(false),
        donation_received: ActiveValue::Set(true),
        donated_by: ActiveValue::Set(Some(77)),
        donated_by_name: ActiveValue::Set(Some("Maria Santos".to_string())),
        donation_timestamp: ActiveValue::Set(Some(timestamp)),
        next_request_allowed_at: ActiveValue::Set(Some(next_allowed_at)),
        created_at: ActiveValue::Set(timestamp),
        updated_at: ActiveValue::Set(timestamp),
        last_seen: ActiveValue::Set(timestamp),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts a donation-history row directly, bypassing redemption.
pub async fn insert_history<C: ConnectionTrait>(
    db: &C,
    donator_id: i64,
    qr_code: &str,
) -> Result<entity::donation_history::Model, DbErr> {
    entity::donation_history::ActiveModel {
        donator_id: ActiveValue::Set(donator_id),
        donator_name: ActiveValue::Set("Maria Santos".to_string()),
        donator_email: ActiveValue::Set("maria.santos@example.com".to_string()),
        affected_first_name: ActiveValue::Set("Juan".to_string()),
        affected_last_name: ActiveValue::Set("Dela Cruz".to_string()),
        affected_phone: ActiveValue::Set("09171234567".to_string()),
        latitude: ActiveValue::Set(14.5995),
        longitude: ActiveValue::Set(120.9842),
        supply_needs_fulfilled: ActiveValue::Set(supply_needs(5, 3)),
        qr_code: ActiveValue::Set(qr_code.to_string()),
        donated_at: ActiveValue::Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
