//! Pure functions that compute the post-transition request.
//!
//! None of these mutate their input; the service stores the returned copy
//! with a version check so a transition is applied fully or not at all.
//! Callers run the guards in `transitions` first.

use super::transitions::Transition;
use crate::models::{
    Consultation, CreateConsultationRequest, CreateLabResult, LabResult, TestRequest, User,
};
use chrono::NaiveDate;

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// INITIATED → LAB_TEST_IN_PROGRESS, attaching an empty lab result.
pub fn assign_lab_test(request: &TestRequest, tester: &User) -> TestRequest {
    let mut next = request.clone();
    next.status = Transition::AssignForLabTest.to_status();
    next.lab_result = Some(LabResult::assigned_to(tester.clone()));
    next
}

/// LAB_TEST_IN_PROGRESS → LAB_TEST_COMPLETED, filling in the lab result.
pub fn complete_lab_test(
    request: &TestRequest,
    input: &CreateLabResult,
    tester: &User,
    today: NaiveDate,
) -> TestRequest {
    let mut next = request.clone();
    let mut lab_result = next
        .lab_result
        .take()
        .unwrap_or_else(|| LabResult::assigned_to(tester.clone()));

    lab_result.result = input.result;
    lab_result.blood_pressure = non_blank(&input.blood_pressure);
    lab_result.heart_beat = non_blank(&input.heart_beat);
    lab_result.temperature = non_blank(&input.temperature);
    lab_result.oxygen_level = non_blank(&input.oxygen_level);
    lab_result.comments = non_blank(&input.comments);
    lab_result.updated_on = Some(today);

    next.lab_result = Some(lab_result);
    next.status = Transition::UpdateLabTest.to_status();
    next
}

/// LAB_TEST_COMPLETED → DIAGNOSIS_IN_PROCESS, attaching an empty
/// consultation owned by `doctor`.
pub fn assign_consultation(request: &TestRequest, doctor: &User) -> TestRequest {
    let mut next = request.clone();
    next.status = Transition::AssignForConsultation.to_status();
    next.consultation = Some(Consultation::assigned_to(doctor.clone()));
    next
}

/// DIAGNOSIS_IN_PROCESS → COMPLETED, recording the doctor's suggestion.
pub fn complete_consultation(
    request: &TestRequest,
    input: &CreateConsultationRequest,
    doctor: &User,
    today: NaiveDate,
) -> TestRequest {
    let mut next = request.clone();
    let mut consultation = next
        .consultation
        .take()
        .unwrap_or_else(|| Consultation::assigned_to(doctor.clone()));

    consultation.suggestion = input.suggestion;
    consultation.comments = non_blank(&input.comments);
    consultation.updated_on = Some(today);

    next.consultation = Some(consultation);
    next.status = Transition::UpdateConsultation.to_status();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DoctorSuggestion, RequestStatus, Role, TestStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
    }

    #[test]
    fn test_assign_lab_test_leaves_input_untouched() {
        let tester = User::new(1, "tester", Role::Tester);
        let request = TestRequest::new(1, "Alice");

        let next = assign_lab_test(&request, &tester);
        assert_eq!(next.status, RequestStatus::LabTestInProgress);
        assert_eq!(next.lab_result.as_ref().unwrap().tester, tester);
        assert_eq!(request.status, RequestStatus::Initiated);
        assert!(request.lab_result.is_none());
    }

    #[test]
    fn test_complete_lab_test_populates_result() {
        let tester = User::new(1, "tester", Role::Tester);
        let request = assign_lab_test(&TestRequest::new(1, "Alice"), &tester);
        let input = CreateLabResult {
            result: Some(TestStatus::Negative),
            blood_pressure: "120".to_string(),
            heart_beat: "91".to_string(),
            temperature: "98.6".to_string(),
            oxygen_level: "97".to_string(),
            comments: " ".to_string(),
        };

        let next = complete_lab_test(&request, &input, &tester, today());
        let lab_result = next.lab_result.unwrap();
        assert_eq!(next.status, RequestStatus::LabTestCompleted);
        assert_eq!(lab_result.result, Some(TestStatus::Negative));
        assert_eq!(lab_result.temperature.as_deref(), Some("98.6"));
        assert_eq!(lab_result.comments, None);
        assert_eq!(lab_result.updated_on, Some(today()));
    }

    #[test]
    fn test_consultation_steps() {
        let doctor = User::new(2, "doctor", Role::Doctor);
        let request = TestRequest::new(i64::MAX, "Bob").with_status(RequestStatus::LabTestCompleted);

        let assigned = assign_consultation(&request, &doctor);
        assert_eq!(assigned.status, RequestStatus::DiagnosisInProcess);
        assert_eq!(assigned.consultation.as_ref().unwrap().doctor, doctor);

        let input = CreateConsultationRequest {
            suggestion: Some(DoctorSuggestion::HomeQuarantine),
            comments: "HOME QUARANTINE".to_string(),
        };
        let completed = complete_consultation(&assigned, &input, &doctor, today());
        let consultation = completed.consultation.unwrap();
        assert_eq!(completed.status, RequestStatus::Completed);
        assert_eq!(consultation.suggestion, Some(DoctorSuggestion::HomeQuarantine));
        assert_eq!(consultation.comments.as_deref(), Some("HOME QUARANTINE"));
    }
}
