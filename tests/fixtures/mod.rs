//! Shared test data for workflow tests.
//!
//! Mirrors the records lab testers and doctors see in practice: a request
//! with the largest possible ID, a positive lab result with typical vitals,
//! and the consultation a doctor would write for it.

#![allow(dead_code)]

use std::sync::Arc;
use upstac_workflow::models::{
    Consultation, CreateConsultationRequest, CreateLabResult, DoctorSuggestion, LabResult,
    RequestStatus, Role, TestRequest, TestStatus, User,
};
use upstac_workflow::repositories::{InMemoryFlowRepository, TestRequestRepository};
use upstac_workflow::services::TestRequestWorkflowImpl;

pub const INVALID_REQUEST_ID: i64 = -34;

pub fn tester() -> User {
    User::new(1, "someuser", Role::Tester)
}

pub fn doctor() -> User {
    User::new(1, "someuser", Role::Doctor)
}

/// A request with id `i64::MAX` in `status`, with the sub-records that
/// status implies.
pub fn test_request_in(status: RequestStatus) -> TestRequest {
    let mut request = TestRequest::new(i64::MAX, "Test Patient").with_status(status);
    if status.allows_lab_result() {
        request.lab_result = Some(LabResult::assigned_to(tester()));
    }
    if status.allows_consultation() {
        request.consultation = Some(Consultation::assigned_to(doctor()));
    }
    request
}

pub fn create_lab_result() -> CreateLabResult {
    CreateLabResult {
        result: Some(TestStatus::Positive),
        blood_pressure: "120".to_string(),
        heart_beat: "91".to_string(),
        temperature: "100".to_string(),
        oxygen_level: "92".to_string(),
        comments: "Take Rest".to_string(),
    }
}

/// The consultation a doctor writes for a given lab outcome.
pub fn create_consultation_request(lab_result: &CreateLabResult) -> CreateConsultationRequest {
    match lab_result.result {
        Some(TestStatus::Positive) => CreateConsultationRequest {
            suggestion: Some(DoctorSuggestion::HomeQuarantine),
            comments: "HOME QUARANTINE".to_string(),
        },
        _ => CreateConsultationRequest {
            suggestion: Some(DoctorSuggestion::NoIssues),
            comments: "Ok".to_string(),
        },
    }
}

pub fn workflow_over(requests: Arc<dyn TestRequestRepository>) -> TestRequestWorkflowImpl {
    TestRequestWorkflowImpl::new(requests, Arc::new(InMemoryFlowRepository::new()))
}
