//! Structured supply-needs payloads.
//!
//! The inbound payloads are free-form JSON from form submissions, so both
//! records validate from untyped [`Value`]s: unknown keys are rejected,
//! counts must coerce to non-negative integers (integer strings included,
//! since multipart forms deliver everything as text), and the free-text
//! fields pass through as-is. Sanitization of the free text is the
//! external HTML-filter collaborator's concern.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Categories a requester can ask for. `people_count` is headcount, not a
/// deliverable, so it has no `*_received` counterpart in confirmations.
pub const SUPPLY_COUNT_FIELDS: [&str; 6] = [
    "water",
    "food",
    "people_count",
    "medical_supplies",
    "clothing",
    "shelter_materials",
];

const CONFIRMED_COUNT_FIELDS: [&str; 5] = [
    "water_received",
    "food_received",
    "medical_supplies_received",
    "clothing_received",
    "shelter_materials_received",
];

/// Non-negative counts per fixed category plus one free-text `other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyNeeds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_supplies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_materials: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl SupplyNeeds {
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        let object = as_object(value)?;

        reject_unknown_fields(&object, &SUPPLY_COUNT_FIELDS, &["other"])?;

        Ok(Self {
            water: parse_count(&object, "water")?,
            food: parse_count(&object, "food")?,
            people_count: parse_count(&object, "people_count")?,
            medical_supplies: parse_count(&object, "medical_supplies")?,
            clothing: parse_count(&object, "clothing")?,
            shelter_materials: parse_count(&object, "shelter_materials")?,
            other: parse_text(&object, "other")?,
        })
    }

    /// JSON form stored in the `supply_needs` column; absent fields are
    /// omitted so fetch returns exactly what was submitted.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        insert_count(&mut map, "water", self.water);
        insert_count(&mut map, "food", self.food);
        insert_count(&mut map, "people_count", self.people_count);
        insert_count(&mut map, "medical_supplies", self.medical_supplies);
        insert_count(&mut map, "clothing", self.clothing);
        insert_count(&mut map, "shelter_materials", self.shelter_materials);
        if let Some(other) = &self.other {
            map.insert("other".to_string(), Value::String(other.clone()));
        }

        Value::Object(map)
    }
}

/// Quantities the affected person confirms actually arrived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppliesConfirmed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_received: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_received: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_supplies_received: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothing_received: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_materials_received: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_supplies_received: Option<bool>,
}

impl SuppliesConfirmed {
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        let object = as_object(value)?;

        reject_unknown_fields(
            &object,
            &CONFIRMED_COUNT_FIELDS,
            &["other_items", "all_supplies_received"],
        )?;

        let all_supplies_received = match object.get("all_supplies_received") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(flag)) => Some(*flag),
            Some(_) => {
                return Err(ValidationError::SupplyBoolField(
                    "all_supplies_received".to_string(),
                ))
            }
        };

        Ok(Self {
            water_received: parse_count(&object, "water_received")?,
            food_received: parse_count(&object, "food_received")?,
            medical_supplies_received: parse_count(&object, "medical_supplies_received")?,
            clothing_received: parse_count(&object, "clothing_received")?,
            shelter_materials_received: parse_count(&object, "shelter_materials_received")?,
            other_items: parse_text(&object, "other_items")?,
            all_supplies_received,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        insert_count(&mut map, "water_received", self.water_received);
        insert_count(&mut map, "food_received", self.food_received);
        insert_count(
            &mut map,
            "medical_supplies_received",
            self.medical_supplies_received,
        );
        insert_count(&mut map, "clothing_received", self.clothing_received);
        insert_count(
            &mut map,
            "shelter_materials_received",
            self.shelter_materials_received,
        );
        if let Some(other) = &self.other_items {
            map.insert("other_items".to_string(), Value::String(other.clone()));
        }
        if let Some(flag) = self.all_supplies_received {
            map.insert("all_supplies_received".to_string(), Value::Bool(flag));
        }

        Value::Object(map)
    }

    /// Confirmed quantities mapped back onto the supply categories: each
    /// `*_received` count becomes its category, zero and absent counts are
    /// dropped, and `other_items` carries over as `other`. This is the
    /// view that overwrites the ledger entry once a rating exists.
    pub fn fulfilled_view(&self) -> Value {
        let mut map = Map::new();

        let confirmed = [
            ("water", self.water_received),
            ("food", self.food_received),
            ("medical_supplies", self.medical_supplies_received),
            ("clothing", self.clothing_received),
            ("shelter_materials", self.shelter_materials_received),
        ];
        for (category, count) in confirmed {
            if let Some(count) = count {
                if count > 0 {
                    map.insert(category.to_string(), count.into());
                }
            }
        }

        if let Some(other) = &self.other_items {
            if !other.is_empty() {
                map.insert("other".to_string(), Value::String(other.clone()));
            }
        }

        Value::Object(map)
    }
}

fn as_object(value: &Value) -> Result<Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        // Multipart form fields arrive as strings; accept embedded JSON.
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(ValidationError::SupplyNeedsNotAnObject),
        },
        Value::Null => Ok(Map::new()),
        _ => Err(ValidationError::SupplyNeedsNotAnObject),
    }
}

fn reject_unknown_fields(
    object: &Map<String, Value>,
    count_fields: &[&str],
    text_fields: &[&str],
) -> Result<(), ValidationError> {
    let mut unknown: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !count_fields.contains(key) && !text_fields.contains(key))
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        unknown.sort_unstable();
        Err(ValidationError::UnknownSupplyFields(unknown.join(", ")))
    }
}

fn parse_count(object: &Map<String, Value>, field: &str) -> Result<Option<u32>, ValidationError> {
    let value = match object.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| ValidationError::SupplyCount(field.to_string()))
}

fn parse_text(object: &Map<String, Value>, field: &str) -> Result<Option<String>, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ValidationError::SupplyTextField(field.to_string())),
    }
}

fn insert_count(map: &mut Map<String, Value>, field: &str, value: Option<u32>) {
    if let Some(value) = value {
        map.insert(field.to_string(), value.into());
    }
}
