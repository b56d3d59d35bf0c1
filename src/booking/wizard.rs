use crate::booking::model::{
    BookingRequest, Budget, Choice, DATE_FORMAT, Destination, Field, FlightClass, Motive, TripDuration,
};
use crate::booking::validation::{self, ValidationError, ValidationKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    Personal,
    TripPreferences,
    TravelDetails,
    MotivesAndNotes,
}

impl Step {
    pub const ALL: &'static [Step] = &[
        Step::Personal,
        Step::TripPreferences,
        Step::TravelDetails,
        Step::MotivesAndNotes,
    ];

    pub const FIRST: Step = Step::Personal;
    pub const LAST: Step = Step::MotivesAndNotes;

    /// 1-based position shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::TripPreferences => 2,
            Step::TravelDetails => 3,
            Step::MotivesAndNotes => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Step> {
        Step::ALL.iter().copied().find(|s| s.number() == number)
    }

    pub fn next(&self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Personal => "Personal Information",
            Step::TripPreferences => "Trip Preferences",
            Step::TravelDetails => "Travel Details",
            Step::MotivesAndNotes => "Additional Information",
        }
    }

    pub fn of_field(field: Field) -> Step {
        match field {
            Field::FirstName | Field::LastName | Field::Email | Field::Phone | Field::Country => Step::Personal,
            Field::Destination | Field::Duration | Field::Travelers => Step::TripPreferences,
            Field::TravelDate | Field::FlightClass | Field::Budget => Step::TravelDetails,
            Field::Motives | Field::SpecialRequirements => Step::MotivesAndNotes,
        }
    }
}

/// Whether "Next" checks the current step's required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepGating {
    /// Refuse to leave a step with invalid required fields.
    #[default]
    Strict,
    /// Always advance; required fields are only enforced at submit.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    Validation(Vec<ValidationError>),
    NotAtFinalStep(Step),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::Validation(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "booking is incomplete: {}", messages.join("; "))
            }
            WizardError::NotAtFinalStep(step) => {
                write!(f, "bookings can only be submitted from step {}, currently at step {}", Step::LAST.number(), step.number())
            }
        }
    }
}

impl std::error::Error for WizardError {}

/// The four-step booking form. Navigation never touches the collected data,
/// and the step index stays within `Step::FIRST..=Step::LAST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWizard {
    id: Uuid,
    step: Step,
    request: BookingRequest,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: Step::FIRST,
            request: BookingRequest::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    pub fn can_retreat(&self) -> bool {
        self.step != Step::FIRST
    }

    pub fn is_final_step(&self) -> bool {
        self.step == Step::LAST
    }

    /// Moves forward one step. A no-op on the final step, where only
    /// `submit` leads on.
    pub fn advance(&mut self, gating: StepGating) -> Result<Step, WizardError> {
        let Some(next) = self.step.next() else {
            return Ok(self.step);
        };
        if gating == StepGating::Strict {
            let errors = validation::validate_step(&self.request, self.step);
            if !errors.is_empty() {
                return Err(WizardError::Validation(errors));
            }
        }
        self.step = next;
        Ok(self.step)
    }

    /// Moves back one step. A no-op on the first step.
    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Jumps back to an earlier step. Targets at or after the current step are ignored.
    pub fn rewind_to(&mut self, target: Step) -> Step {
        if target < self.step {
            self.step = target;
        }
        self.step
    }

    /// Replaces the request snapshot with whatever `f` builds from it.
    pub fn update(&mut self, f: impl FnOnce(BookingRequest) -> BookingRequest) {
        let current = std::mem::take(&mut self.request);
        self.request = f(current);
    }

    /// Parses a raw form value into `field`. On error the snapshot is left as it was.
    pub fn apply(&mut self, field: Field, raw: &str) -> Result<(), ValidationError> {
        let next = apply_field(self.request.clone(), field, raw)?;
        self.request = next;
        Ok(())
    }

    /// Returns whether the motive is selected afterwards.
    pub fn toggle_motive(&mut self, motive: Motive) -> bool {
        self.update(|request| request.toggling_motive(motive));
        self.request.motives.contains(motive)
    }

    /// Packages the booking for delivery. Every step is validated, whatever
    /// the gating policy, and the wizard is left untouched either way.
    pub fn submit(&self) -> Result<BookingRequest, WizardError> {
        if self.step != Step::LAST {
            return Err(WizardError::NotAtFinalStep(self.step));
        }
        let errors = validation::validate_all(&self.request);
        if !errors.is_empty() {
            return Err(WizardError::Validation(errors));
        }
        Ok(self.request.clone())
    }

    /// Starts over with an empty request and a fresh id.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Earliest step owning one of `errors`.
pub fn first_invalid_step(errors: &[ValidationError]) -> Option<Step> {
    errors.iter().map(ValidationError::step).min()
}

fn parse_choice<T: Choice>(field: Field, raw: &str) -> Result<Option<T>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    T::from_token(raw)
        .map(Some)
        .ok_or_else(|| ValidationError::new(field, ValidationKind::NotAnOption(raw.trim().to_string())))
}

fn apply_field(request: BookingRequest, field: Field, raw: &str) -> Result<BookingRequest, ValidationError> {
    let updated = match field {
        Field::FirstName => request.with_first_name(raw),
        Field::LastName => request.with_last_name(raw),
        Field::Email => request.with_email(raw),
        Field::Phone => request.with_phone(raw),
        Field::Country => request.with_country(raw),
        Field::Destination => request.with_destination(parse_choice::<Destination>(field, raw)?),
        Field::Duration => request.with_duration(parse_choice::<TripDuration>(field, raw)?),
        Field::Travelers => {
            let travelers: u32 = raw
                .trim()
                .parse()
                .map_err(|_| ValidationError::new(field, ValidationKind::InvalidNumber(raw.trim().to_string())))?;
            if travelers < 1 {
                return Err(ValidationError::new(field, ValidationKind::OutOfRange));
            }
            request.with_travelers(travelers)
        }
        Field::TravelDate => {
            let date = if raw.trim().is_empty() {
                None
            } else {
                let parsed = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                    .map_err(|_| ValidationError::new(field, ValidationKind::InvalidDate(raw.trim().to_string())))?;
                Some(parsed)
            };
            request.with_travel_date(date)
        }
        Field::FlightClass => {
            let class = parse_choice::<FlightClass>(field, raw)?.unwrap_or_default();
            request.with_flight_class(class)
        }
        Field::Budget => request.with_budget(parse_choice::<Budget>(field, raw)?),
        Field::Motives => {
            let motive = parse_choice::<Motive>(field, raw)?
                .ok_or_else(|| ValidationError::required(field))?;
            request.toggling_motive(motive)
        }
        Field::SpecialRequirements => request.with_special_requirements(raw),
    };
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::model::MotiveSet;

    fn fill_personal(wizard: &mut BookingWizard) {
        wizard.apply(Field::FirstName, "Jane").unwrap();
        wizard.apply(Field::LastName, "Doe").unwrap();
        wizard.apply(Field::Email, "jane@x.com").unwrap();
        wizard.apply(Field::Phone, "123").unwrap();
        wizard.apply(Field::Country, "UK").unwrap();
    }

    #[test]
    fn test_step_numbers_and_neighbours() {
        assert_eq!(Step::Personal.number(), 1);
        assert_eq!(Step::MotivesAndNotes.number(), 4);
        assert_eq!(Step::Personal.previous(), None);
        assert_eq!(Step::MotivesAndNotes.next(), None);
        assert_eq!(Step::TripPreferences.next(), Some(Step::TravelDetails));
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(5), None);
    }

    #[test]
    fn test_step_index_stays_in_bounds() {
        let mut wizard = BookingWizard::new();
        assert_eq!(wizard.retreat(), Step::Personal);
        assert!(!wizard.can_retreat());

        for _ in 0..10 {
            wizard.advance(StepGating::Lenient).unwrap();
        }
        assert_eq!(wizard.step(), Step::MotivesAndNotes);
        assert!(wizard.is_final_step());
        assert_eq!(wizard.advance(StepGating::Lenient), Ok(Step::MotivesAndNotes));

        for _ in 0..10 {
            wizard.retreat();
        }
        assert_eq!(wizard.step(), Step::Personal);
    }

    #[test]
    fn test_navigation_never_loses_data() {
        let mut wizard = BookingWizard::new();
        fill_personal(&mut wizard);
        wizard.advance(StepGating::Lenient).unwrap();
        wizard.apply(Field::Destination, "Skeleton Coast").unwrap();
        wizard.apply(Field::Travelers, "4").unwrap();
        let snapshot = wizard.request().clone();

        let moves = [true, true, false, true, false, false, false, true, true, true, true];
        for forward in moves {
            if forward {
                wizard.advance(StepGating::Lenient).unwrap();
            } else {
                wizard.retreat();
            }
            assert_eq!(wizard.request(), &snapshot);
        }
    }

    #[test]
    fn test_strict_gating_blocks_incomplete_step() {
        let mut wizard = BookingWizard::new();
        wizard.apply(Field::FirstName, "Jane").unwrap();
        let err = wizard.advance(StepGating::Strict).unwrap_err();
        match err {
            WizardError::Validation(errors) => {
                let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec![Field::LastName, Field::Email, Field::Phone, Field::Country]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(wizard.step(), Step::Personal);
        assert_eq!(wizard.request().first_name, "Jane");
    }

    #[test]
    fn test_lenient_gating_advances_with_empty_fields() {
        let mut wizard = BookingWizard::new();
        assert_eq!(wizard.advance(StepGating::Lenient), Ok(Step::TripPreferences));
        assert_eq!(wizard.advance(StepGating::Lenient), Ok(Step::TravelDetails));
    }

    #[test]
    fn test_toggle_motive_twice_restores_previous_set() {
        let mut wizard = BookingWizard::new();
        wizard.toggle_motive(Motive::Honeymoon);
        let before = wizard.request().motives.clone();

        assert!(wizard.toggle_motive(Motive::Culture));
        assert!(!wizard.toggle_motive(Motive::Culture));
        assert_eq!(wizard.request().motives, before);
    }

    #[test]
    fn test_odd_number_of_toggles_keeps_motive_once() {
        let mut wizard = BookingWizard::new();
        for _ in 0..3 {
            wizard.toggle_motive(Motive::Culture);
        }
        let expected: MotiveSet = [Motive::Culture].into_iter().collect();
        assert_eq!(wizard.request().motives, expected);
        assert_eq!(wizard.request().motives.len(), 1);
    }

    #[test]
    fn test_full_booking_produces_expected_payload() {
        let mut wizard = BookingWizard::new();
        fill_personal(&mut wizard);
        wizard.advance(StepGating::Strict).unwrap();
        wizard.apply(Field::Destination, "Etosha National Park").unwrap();
        wizard.advance(StepGating::Strict).unwrap();
        wizard.advance(StepGating::Strict).unwrap();
        wizard.toggle_motive(Motive::Culture);
        wizard.toggle_motive(Motive::Honeymoon);

        let request = wizard.submit().unwrap();
        let payload: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@x.com",
                "phone": "123",
                "country": "UK",
                "destination": "Etosha National Park",
                "duration": "",
                "travelers": 1,
                "travelDate": "",
                "flightClass": "economy",
                "budget": "",
                "motives": ["Culture", "Honeymoon"],
                "specialRequirements": ""
            })
        );
    }

    #[test]
    fn test_submit_rejects_empty_personal_fields() {
        let mut wizard = BookingWizard::new();
        for _ in 0..3 {
            wizard.advance(StepGating::Lenient).unwrap();
        }
        wizard.apply(Field::Destination, "Damaraland").unwrap();
        wizard.apply(Field::SpecialRequirements, "Wheelchair access").unwrap();

        let err = wizard.submit().unwrap_err();
        let WizardError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::FirstName, Field::LastName, Field::Email, Field::Phone, Field::Country]
        );
        assert_eq!(first_invalid_step(&errors), Some(Step::Personal));
        assert_eq!(wizard.step(), Step::MotivesAndNotes);
    }

    #[test]
    fn test_submit_only_from_final_step() {
        let wizard = BookingWizard::new();
        assert_eq!(wizard.submit(), Err(WizardError::NotAtFinalStep(Step::Personal)));
    }

    #[test]
    fn test_apply_rejects_bad_values_without_touching_snapshot() {
        let mut wizard = BookingWizard::new();
        wizard.apply(Field::Travelers, "3").unwrap();

        let err = wizard.apply(Field::Travelers, "0").unwrap_err();
        assert_eq!(err.kind, ValidationKind::OutOfRange);
        let err = wizard.apply(Field::Travelers, "lots").unwrap_err();
        assert_eq!(err.kind, ValidationKind::InvalidNumber("lots".into()));
        let err = wizard.apply(Field::Destination, "Atlantis").unwrap_err();
        assert_eq!(err.kind, ValidationKind::NotAnOption("Atlantis".into()));
        let err = wizard.apply(Field::TravelDate, "next tuesday").unwrap_err();
        assert_eq!(err.kind, ValidationKind::InvalidDate("next tuesday".into()));

        assert_eq!(wizard.request().travelers, 3);
        assert_eq!(wizard.request().destination, None);
    }

    #[test]
    fn test_apply_parses_optional_fields() {
        let mut wizard = BookingWizard::new();
        wizard.apply(Field::Duration, "14").unwrap();
        wizard.apply(Field::TravelDate, "2025-07-19").unwrap();
        wizard.apply(Field::FlightClass, "business").unwrap();
        wizard.apply(Field::Budget, "7000+").unwrap();

        let request = wizard.request();
        assert_eq!(request.duration, Some(TripDuration::TwoWeeks));
        assert_eq!(request.travel_date, NaiveDate::from_ymd_opt(2025, 7, 19));
        assert_eq!(request.flight_class, FlightClass::Business);
        assert_eq!(request.budget, Some(Budget::Above7000));

        wizard.apply(Field::Duration, "").unwrap();
        wizard.apply(Field::TravelDate, "").unwrap();
        assert_eq!(wizard.request().duration, None);
        assert_eq!(wizard.request().travel_date, None);
    }

    #[test]
    fn test_rewind_only_moves_backwards() {
        let mut wizard = BookingWizard::new();
        wizard.advance(StepGating::Lenient).unwrap();
        wizard.advance(StepGating::Lenient).unwrap();
        assert_eq!(wizard.rewind_to(Step::MotivesAndNotes), Step::TravelDetails);
        assert_eq!(wizard.rewind_to(Step::Personal), Step::Personal);
    }

    #[test]
    fn test_reset_starts_a_new_wizard() {
        let mut wizard = BookingWizard::new();
        let old_id = wizard.id();
        fill_personal(&mut wizard);
        wizard.advance(StepGating::Strict).unwrap();
        wizard.reset();
        assert_ne!(wizard.id(), old_id);
        assert_eq!(wizard.step(), Step::Personal);
        assert_eq!(wizard.request(), &BookingRequest::default());
    }
}
