mod history;
mod lifecycle;
mod rating;
mod redemption;
mod tracking;

use hatid::model::{request::NewRequest, Donator};
use serde_json::json;

pub fn donator(id: i64) -> Donator {
    Donator {
        id,
        first_name: "Maria".to_string(),
        last_name: "Santos".to_string(),
        email: "maria.santos@example.com".to_string(),
    }
}

/// Valid submission payload; tests mutate the fields they exercise.
pub fn submission(session_id: &str, phone: &str) -> NewRequest {
    NewRequest {
        session_id: session_id.to_string(),
        first_name: "Juan".to_string(),
        last_name: "Dela Cruz".to_string(),
        phone: phone.to_string(),
        facebook: Some("juan.delacruz".to_string()),
        email: None,
        notes: Some("Near the covered court".to_string()),
        photo_ref: None,
        latitude: 14.5995,
        longitude: 120.9842,
        accuracy: Some(10.0),
        supply_needs: json!({ "water": 5, "food": 3 }),
    }
}
