use crate::booking::model::{BookingRequest, Field};
use crate::booking::wizard::Step;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValidationKind {
    Required,
    InvalidEmail,
    NotAnOption(String),
    InvalidNumber(String),
    InvalidDate(String),
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationKind) -> Self {
        Self { field, kind }
    }

    pub fn required(field: Field) -> Self {
        Self::new(field, ValidationKind::Required)
    }

    /// The wizard step that owns the offending field.
    pub fn step(&self) -> Step {
        Step::of_field(self.field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.field.label();
        match &self.kind {
            ValidationKind::Required => write!(f, "{} is required", label),
            ValidationKind::InvalidEmail => write!(f, "{} must be a valid email address", label),
            ValidationKind::NotAnOption(raw) => write!(f, "`{}` is not a valid {}", raw, label.to_lowercase()),
            ValidationKind::InvalidNumber(raw) => write!(f, "{} must be a whole number, got `{}`", label, raw),
            ValidationKind::InvalidDate(raw) => write!(f, "{} must be a date (YYYY-MM-DD), got `{}`", label, raw),
            ValidationKind::OutOfRange => write!(f, "{} must be at least 1", label),
        }
    }
}

impl std::error::Error for ValidationError {}

fn require_text(errors: &mut Vec<ValidationError>, field: Field, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::required(field));
    }
}

/// Checks the fields owned by `step`. Steps 3 and 4 carry no required fields.
pub fn validate_step(request: &BookingRequest, step: Step) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match step {
        Step::Personal => {
            require_text(&mut errors, Field::FirstName, &request.first_name);
            require_text(&mut errors, Field::LastName, &request.last_name);
            require_text(&mut errors, Field::Email, &request.email);
            if !request.email.trim().is_empty() && !EMAIL_PATTERN.is_match(request.email.trim()) {
                errors.push(ValidationError::new(Field::Email, ValidationKind::InvalidEmail));
            }
            require_text(&mut errors, Field::Phone, &request.phone);
            require_text(&mut errors, Field::Country, &request.country);
        }
        Step::TripPreferences => {
            if request.destination.is_none() {
                errors.push(ValidationError::required(Field::Destination));
            }
            if request.travelers < 1 {
                errors.push(ValidationError::new(Field::Travelers, ValidationKind::OutOfRange));
            }
        }
        Step::TravelDetails | Step::MotivesAndNotes => {}
    }
    errors
}

/// Checks every step, in step order.
pub fn validate_all(request: &BookingRequest) -> Vec<ValidationError> {
    Step::ALL
        .iter()
        .flat_map(|step| validate_step(request, *step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::model::Destination;

    fn personal() -> BookingRequest {
        BookingRequest::default()
            .with_first_name("Jane")
            .with_last_name("Doe")
            .with_email("jane@x.com")
            .with_phone("123")
            .with_country("UK")
    }

    #[test]
    fn test_empty_personal_step_names_every_required_field() {
        let errors = validate_step(&BookingRequest::default(), Step::Personal);
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::FirstName, Field::LastName, Field::Email, Field::Phone, Field::Country]
        );
        assert!(errors.iter().all(|e| e.kind == ValidationKind::Required));
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let request = personal().with_first_name("   ");
        let errors = validate_step(&request, Step::Personal);
        assert_eq!(errors, vec![ValidationError::required(Field::FirstName)]);
    }

    #[test]
    fn test_malformed_email_is_reported() {
        let request = personal().with_email("jane-at-example");
        let errors = validate_step(&request, Step::Personal);
        assert_eq!(errors, vec![ValidationError::new(Field::Email, ValidationKind::InvalidEmail)]);
    }

    #[test]
    fn test_destination_required_on_trip_step() {
        let errors = validate_step(&personal(), Step::TripPreferences);
        assert_eq!(errors, vec![ValidationError::required(Field::Destination)]);

        let request = personal().with_destination(Some(Destination::Damaraland));
        assert!(validate_step(&request, Step::TripPreferences).is_empty());
    }

    #[test]
    fn test_later_steps_have_no_required_fields() {
        assert!(validate_step(&BookingRequest::default(), Step::TravelDetails).is_empty());
        assert!(validate_step(&BookingRequest::default(), Step::MotivesAndNotes).is_empty());
    }

    #[test]
    fn test_validate_all_reports_personal_fields_regardless_of_later_steps() {
        let request = BookingRequest::default()
            .with_destination(Some(Destination::Etosha))
            .with_special_requirements("Vegetarian meals");
        let errors = validate_all(&request);
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().all(|e| e.step() == Step::Personal));
    }

    #[test]
    fn test_error_messages_read_naturally() {
        assert_eq!(ValidationError::required(Field::Country).to_string(), "Country of residence is required");
        let err = ValidationError::new(Field::Travelers, ValidationKind::InvalidNumber("many".into()));
        assert_eq!(err.to_string(), "Number of travelers must be a whole number, got `many`");
    }
}
