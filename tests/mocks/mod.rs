//! Test doubles for the workflow's collaborators.

mod mock_test_request_repository;
mod mock_workflow;

pub use mock_test_request_repository::MockTestRequestRepository;
pub use mock_workflow::MockWorkflow;
