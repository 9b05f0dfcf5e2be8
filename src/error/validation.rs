use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(
        "Phone number must be a valid PH mobile number \
         (e.g. 09171234567 or +639171234567), got {0:?}"
    )]
    PhoneFormat(String),
    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
    #[error("Supply needs must be a JSON object")]
    SupplyNeedsNotAnObject,
    #[error("Invalid supply needs fields: {0}")]
    UnknownSupplyFields(String),
    #[error("Supply needs field {0:?} must be a non-negative integer")]
    SupplyCount(String),
    #[error("Supply needs field {0:?} must be text")]
    SupplyTextField(String),
    #[error("Supply needs field {0:?} must be a boolean")]
    SupplyBoolField(String),
    #[error("Rating must be between 1 and 5 stars, got {0}")]
    RatingOutOfRange(i32),
}
