use chrono::NaiveDate;
use validator::Validate;

use crate::{ServiceError, ServiceResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Validate)]
struct NameValidator {
    #[validate(length(min = 1))]
    name: String,
}

/// Checks that a submitted game name is usable. The name itself is stored
/// verbatim, only its trimmed form is validated.
pub fn validate_name(name: &str) -> ServiceResult<()> {
    let validator = NameValidator {
        name: name.trim().to_string(),
    };
    if validator.validate().is_err() {
        return ServiceError::bad_request("Game name must not be empty.");
    }
    Ok(())
}

/// Parses a strict `YYYY-MM-DD` date. Unpadded or signed fields are rejected
/// even where chrono alone would accept them.
pub fn parse_date(date_str: &str) -> ServiceResult<NaiveDate> {
    let bytes = date_str.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return ServiceError::bad_request("Failed to parse date.");
    }
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .or_else(|_| ServiceError::bad_request("Failed to parse date."))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
