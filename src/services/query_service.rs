//! Test request query service.
//!
//! Read-only views used by the controllers: work queues per status and the
//! requests a given tester or doctor has taken.

use crate::error::WorkflowResult;
use crate::models::{RequestStatus, TestRequest, TestRequestFlow, User};
use crate::repositories::{TestRequestFlowRepository, TestRequestRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Query service trait for read operations.
#[async_trait]
pub trait TestRequestQueryService: Send + Sync {
    /// All requests currently in `status`.
    async fn find_by(&self, status: RequestStatus) -> WorkflowResult<Vec<TestRequest>>;

    /// A single request; unknown IDs fail with "Invalid ID".
    async fn find_by_id(&self, request_id: i64) -> WorkflowResult<TestRequest>;

    /// Requests whose lab result belongs to `tester`.
    async fn find_by_tester(&self, tester: &User) -> WorkflowResult<Vec<TestRequest>>;

    /// Requests whose consultation belongs to `doctor`.
    async fn find_by_doctor(&self, doctor: &User) -> WorkflowResult<Vec<TestRequest>>;

    /// Transition history of a request, oldest first.
    async fn flow_of(&self, request_id: i64) -> WorkflowResult<Vec<TestRequestFlow>>;
}

/// Default implementation of TestRequestQueryService.
pub struct TestRequestQueryServiceImpl {
    requests: Arc<dyn TestRequestRepository>,
    flows: Arc<dyn TestRequestFlowRepository>,
}

impl TestRequestQueryServiceImpl {
    pub fn new(
        requests: Arc<dyn TestRequestRepository>,
        flows: Arc<dyn TestRequestFlowRepository>,
    ) -> Self {
        Self { requests, flows }
    }
}

#[async_trait]
impl TestRequestQueryService for TestRequestQueryServiceImpl {
    async fn find_by(&self, status: RequestStatus) -> WorkflowResult<Vec<TestRequest>> {
        Ok(self.requests.find_by_status(status).await?)
    }

    async fn find_by_id(&self, request_id: i64) -> WorkflowResult<TestRequest> {
        Ok(self.requests.find_by_id(request_id).await?)
    }

    async fn find_by_tester(&self, tester: &User) -> WorkflowResult<Vec<TestRequest>> {
        let all = self.requests.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|request| {
                request
                    .lab_result
                    .as_ref()
                    .is_some_and(|lab_result| lab_result.tester.is_same_as(tester))
            })
            .collect())
    }

    async fn find_by_doctor(&self, doctor: &User) -> WorkflowResult<Vec<TestRequest>> {
        let all = self.requests.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|request| {
                request
                    .consultation
                    .as_ref()
                    .is_some_and(|consultation| consultation.doctor.is_same_as(doctor))
            })
            .collect())
    }

    async fn flow_of(&self, request_id: i64) -> WorkflowResult<Vec<TestRequestFlow>> {
        // Unknown requests report "Invalid ID" rather than an empty history
        self.requests.find_by_id(request_id).await?;
        Ok(self.flows.find_by_request(request_id).await?)
    }
}
