//! Payload validation for the completion steps.
//!
//! All violations are collected into one `ValidationFailed` message so the
//! caller can fix the payload in a single round trip.

use crate::error::{WorkflowError, WorkflowResult};
use crate::models::{CreateConsultationRequest, CreateLabResult};

fn require_text(violations: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        violations.push(format!("{} must not be blank", field));
    }
}

fn finish(violations: Vec<String>) -> WorkflowResult<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(WorkflowError::ValidationFailed(violations.join(", ")))
    }
}

/// Validate a lab result submission.
///
/// The outcome is required, as are all four vitals.
pub fn validate_lab_result(input: &CreateLabResult) -> WorkflowResult<()> {
    let mut violations = Vec::new();
    if input.result.is_none() {
        violations.push("result must not be null".to_string());
    }
    require_text(&mut violations, "blood_pressure", &input.blood_pressure);
    require_text(&mut violations, "heart_beat", &input.heart_beat);
    require_text(&mut violations, "temperature", &input.temperature);
    require_text(&mut violations, "oxygen_level", &input.oxygen_level);
    finish(violations)
}

/// Validate a consultation submission. Only the suggestion is required.
pub fn validate_consultation(input: &CreateConsultationRequest) -> WorkflowResult<()> {
    let mut violations = Vec::new();
    if input.suggestion.is_none() {
        violations.push("suggestion must not be null".to_string());
    }
    finish(violations)
}
