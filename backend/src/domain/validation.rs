//! Field rules applied by the services before anything reaches storage

use chrono::NaiveDate;
use shared::{parse_enrollment_date, RecordId, NEW_RECORD_ID};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("Credit hours must be positive")]
    NonPositiveCreditHours,
    #[error("A {kind} must be selected")]
    MissingReference { kind: &'static str },
    #[error("No {kind} with id {id}")]
    UnknownReference { kind: &'static str, id: RecordId },
    #[error("Invalid enrollment date '{0}', expected dd/mm/yyyy")]
    InvalidDate(String),
}

/// Trim a required text field, rejecting blank values
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

pub fn positive_credit_hours(credit_hours: u32) -> Result<u32, ValidationError> {
    if credit_hours == 0 {
        return Err(ValidationError::NonPositiveCreditHours);
    }
    Ok(credit_hours)
}

/// Reject the "nothing selected" id
pub fn reference(kind: &'static str, id: RecordId) -> Result<RecordId, ValidationError> {
    if id == NEW_RECORD_ID {
        return Err(ValidationError::MissingReference { kind });
    }
    Ok(id)
}

pub fn enrollment_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = text.trim();
    parse_enrollment_date(trimmed).ok_or_else(|| ValidationError::InvalidDate(trimmed.to_string()))
}
