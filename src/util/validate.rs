//! Pure input validators shared by the write paths.

use crate::error::ValidationError;

/// Accepts PH mobile numbers in local (`09` + 9 digits) or international
/// (`+639` + 9 digits) form.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = match phone.strip_prefix("+639") {
        Some(rest) => rest,
        None => match phone.strip_prefix("09") {
            Some(rest) => rest,
            None => return Err(ValidationError::PhoneFormat(phone.to_string())),
        },
    };

    if digits.len() == 9 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::PhoneFormat(phone.to_string()))
    }
}

/// Range check applied on every write path that carries coordinates.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange(longitude));
    }

    Ok(())
}
