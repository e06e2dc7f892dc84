//! Test request model and its workflow status.

use super::{Consultation, LabResult};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a test request.
///
/// The workflow is strictly linear:
/// INITIATED → LAB_TEST_IN_PROGRESS → LAB_TEST_COMPLETED → DIAGNOSIS_IN_PROCESS → COMPLETED
///
/// Variants are declared in workflow order, so the derived `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Initiated,
    LabTestInProgress,
    LabTestCompleted,
    DiagnosisInProcess,
    Completed,
}

/// The canonical ordering of request statuses.
pub const REQUEST_STATUSES: &[RequestStatus] = &[
    RequestStatus::Initiated,
    RequestStatus::LabTestInProgress,
    RequestStatus::LabTestCompleted,
    RequestStatus::DiagnosisInProcess,
    RequestStatus::Completed,
];

impl RequestStatus {
    /// The status that follows this one, or `None` for `Completed`.
    pub fn next(self) -> Option<RequestStatus> {
        match self {
            RequestStatus::Initiated => Some(RequestStatus::LabTestInProgress),
            RequestStatus::LabTestInProgress => Some(RequestStatus::LabTestCompleted),
            RequestStatus::LabTestCompleted => Some(RequestStatus::DiagnosisInProcess),
            RequestStatus::DiagnosisInProcess => Some(RequestStatus::Completed),
            RequestStatus::Completed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RequestStatus::Completed
    }

    /// Whether a request in this status may carry a lab result.
    pub fn allows_lab_result(self) -> bool {
        self >= RequestStatus::LabTestInProgress
    }

    /// Whether a request in this status may carry a consultation.
    pub fn allows_consultation(self) -> bool {
        self >= RequestStatus::DiagnosisInProcess
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Initiated => "INITIATED",
            RequestStatus::LabTestInProgress => "LAB_TEST_IN_PROGRESS",
            RequestStatus::LabTestCompleted => "LAB_TEST_COMPLETED",
            RequestStatus::DiagnosisInProcess => "DIAGNOSIS_IN_PROCESS",
            RequestStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REQUEST_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown request status: {}", s))
    }
}

/// A COVID-19 test request tracked through the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRequest {
    /// Unique identifier of the request
    pub request_id: i64,

    /// Name of the person the test is for
    #[serde(default)]
    pub name: String,

    /// Date the request was raised
    pub created: NaiveDate,

    /// Current workflow status
    pub status: RequestStatus,

    /// Lab result, attached when a tester picks the request up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_result: Option<LabResult>,

    /// Consultation, attached when a doctor picks the request up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation: Option<Consultation>,

    /// Storage version used for optimistic locking
    #[serde(default)]
    pub version: u64,
}

impl TestRequest {
    /// Create a new request in the `INITIATED` state, dated today.
    pub fn new(request_id: i64, name: impl Into<String>) -> Self {
        Self {
            request_id,
            name: name.into(),
            created: Utc::now().date_naive(),
            status: RequestStatus::Initiated,
            lab_result: None,
            consultation: None,
            version: 0,
        }
    }

    /// Return a copy of this request with the given status.
    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }

    /// Check that sub-records only exist once the status allows them.
    pub fn is_consistent(&self) -> bool {
        (self.lab_result.is_none() || self.status.allows_lab_result())
            && (self.consultation.is_none() || self.status.allows_consultation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};

    #[test]
    fn test_status_order() {
        assert_eq!(REQUEST_STATUSES.len(), 5);
        for pair in REQUEST_STATUSES.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(RequestStatus::Completed.next(), None);
        assert!(RequestStatus::Completed.is_terminal());
        assert!(!RequestStatus::DiagnosisInProcess.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RequestStatus::LabTestInProgress).unwrap();
        assert_eq!(json, "\"LAB_TEST_IN_PROGRESS\"");

        let status: RequestStatus = serde_json::from_str("\"DIAGNOSIS_IN_PROCESS\"").unwrap();
        assert_eq!(status, RequestStatus::DiagnosisInProcess);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "lab_test_completed".parse::<RequestStatus>().unwrap(),
            RequestStatus::LabTestCompleted
        );
        assert!("PENDING".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_new_request_is_initiated() {
        let request = TestRequest::new(7, "Jane Doe");
        assert_eq!(request.status, RequestStatus::Initiated);
        assert!(request.lab_result.is_none());
        assert!(request.consultation.is_none());
        assert_eq!(request.version, 0);
    }

    #[test]
    fn test_consistency_rules() {
        let tester = User::new(1, "tester", Role::Tester);
        let mut request = TestRequest::new(1, "Jane Doe");
        request.lab_result = Some(LabResult::assigned_to(tester));
        assert!(!request.is_consistent());

        let request = request.with_status(RequestStatus::LabTestInProgress);
        assert!(request.is_consistent());

        // Later states without sub-records are still consistent
        let bare = TestRequest::new(2, "John Doe").with_status(RequestStatus::LabTestCompleted);
        assert!(bare.is_consistent());
    }

    #[test]
    fn test_request_deserializes_without_optional_fields() {
        let json = r#"{"request_id": 9, "created": "2020-06-01", "status": "INITIATED"}"#;
        let request: TestRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.request_id, 9);
        assert_eq!(request.version, 0);
        assert!(request.name.is_empty());
    }
}
