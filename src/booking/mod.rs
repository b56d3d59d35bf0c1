//! The booking wizard: the request model, its validation rules, the step
//! state machine and the sinks finished bookings are handed to.

pub mod model;
pub mod sink;
pub mod validation;
pub mod wizard;

pub use model::{BookingRequest, Field, Motive};
pub use sink::{BookingSink, SinkReceipt, SubmissionError};
pub use validation::ValidationError;
pub use wizard::{BookingWizard, Step, StepGating, WizardError};
