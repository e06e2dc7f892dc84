//! Data models for the UpStac test request workflow.
//!
//! This module contains the data structures representing test requests,
//! their lab results and consultations, the users who act on them, and the
//! audit trail of workflow transitions.

pub mod consultation;
pub mod flow;
pub mod lab_result;
pub mod test_request;
pub mod user;

pub use consultation::{Consultation, CreateConsultationRequest, DoctorSuggestion};
pub use flow::TestRequestFlow;
pub use lab_result::{CreateLabResult, LabResult, TestStatus};
pub use test_request::{RequestStatus, TestRequest, REQUEST_STATUSES};
pub use user::{Role, User};
