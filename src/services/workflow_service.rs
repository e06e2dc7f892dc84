//! Test request workflow service.
//!
//! Drives a test request through its four transitions. Every operation runs
//! its checks in the same order: role, payload, lookup, current status,
//! ownership. Only then is the next request computed and stored.

use crate::domain::{self, Transition};
use crate::error::{RepositoryError, WorkflowError, WorkflowResult};
use crate::models::{
    CreateConsultationRequest, CreateLabResult, TestRequest, TestRequestFlow, User,
};
use crate::repositories::{TestRequestFlowRepository, TestRequestRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The status-changing operations on a test request.
#[async_trait]
pub trait TestRequestWorkflow: Send + Sync {
    /// Take an INITIATED request for lab testing.
    async fn assign_for_lab_test(&self, request_id: i64, tester: &User)
        -> WorkflowResult<TestRequest>;

    /// Record the lab result of a request under test.
    async fn update_lab_test(
        &self,
        request_id: i64,
        input: &CreateLabResult,
        tester: &User,
    ) -> WorkflowResult<TestRequest>;

    /// Take a tested request for consultation.
    async fn assign_for_consultation(
        &self,
        request_id: i64,
        doctor: &User,
    ) -> WorkflowResult<TestRequest>;

    /// Record the doctor's suggestion and close the request.
    async fn update_consultation(
        &self,
        request_id: i64,
        input: &CreateConsultationRequest,
        doctor: &User,
    ) -> WorkflowResult<TestRequest>;
}

/// Default implementation of TestRequestWorkflow.
pub struct TestRequestWorkflowImpl {
    requests: Arc<dyn TestRequestRepository>,
    flows: Arc<dyn TestRequestFlowRepository>,
}

impl TestRequestWorkflowImpl {
    /// Create a new workflow over the given repositories.
    pub fn new(
        requests: Arc<dyn TestRequestRepository>,
        flows: Arc<dyn TestRequestFlowRepository>,
    ) -> Self {
        Self { requests, flows }
    }

    /// Look up, guard, apply and store one transition.
    ///
    /// Role and payload checks are the caller's job and must already have
    /// passed.
    async fn execute<F>(
        &self,
        transition: Transition,
        request_id: i64,
        user: &User,
        apply: F,
    ) -> WorkflowResult<TestRequest>
    where
        F: FnOnce(&TestRequest) -> TestRequest + Send,
    {
        debug!(request_id, %transition, "Looking up test request");
        let current = self.requests.find_by_id(request_id).await?;

        domain::check_precondition(transition, &current)
            .and_then(|_| domain::check_ownership(transition, &current, user))
            .map_err(|e| {
                warn!(request_id, %transition, user = %user.user_name, "Transition rejected: {}", e);
                e
            })?;

        let next = apply(&current);
        let saved = match self.requests.save(&next, current.version).await {
            Ok(saved) => saved,
            Err(RepositoryError::VersionConflict { .. }) => {
                // Someone else moved the request on; report what we see now.
                let latest = self.requests.find_by_id(request_id).await?;
                warn!(
                    request_id,
                    %transition,
                    status = %latest.status,
                    "Lost a concurrent update"
                );
                if latest.status == transition.from_status() {
                    return Err(WorkflowError::Storage(RepositoryError::VersionConflict {
                        request_id,
                        expected: current.version,
                        found: latest.version,
                    }));
                }
                return Err(transition.invalid_from(request_id, latest.status));
            }
            Err(e) => return Err(e.into()),
        };

        let flow = TestRequestFlow::new(
            request_id,
            current.status,
            saved.status,
            user.clone(),
        );
        if let Err(e) = self.flows.record(&flow).await {
            // The transition itself is committed; a missing audit entry must not undo it.
            error!(request_id, "Failed to record transition flow: {}", e);
        }

        info!(
            request_id,
            from = %current.status,
            to = %saved.status,
            user = %user.user_name,
            "Test request advanced"
        );
        Ok(saved)
    }
}

#[async_trait]
impl TestRequestWorkflow for TestRequestWorkflowImpl {
    async fn assign_for_lab_test(
        &self,
        request_id: i64,
        tester: &User,
    ) -> WorkflowResult<TestRequest> {
        let transition = Transition::AssignForLabTest;
        domain::check_permission(transition, tester)?;

        self.execute(transition, request_id, tester, |request| {
            domain::assign_lab_test(request, tester)
        })
        .await
    }

    async fn update_lab_test(
        &self,
        request_id: i64,
        input: &CreateLabResult,
        tester: &User,
    ) -> WorkflowResult<TestRequest> {
        let transition = Transition::UpdateLabTest;
        domain::check_permission(transition, tester)?;
        domain::validate_lab_result(input)?;

        let today = Utc::now().date_naive();
        self.execute(transition, request_id, tester, |request| {
            domain::complete_lab_test(request, input, tester, today)
        })
        .await
    }

    async fn assign_for_consultation(
        &self,
        request_id: i64,
        doctor: &User,
    ) -> WorkflowResult<TestRequest> {
        let transition = Transition::AssignForConsultation;
        domain::check_permission(transition, doctor)?;

        self.execute(transition, request_id, doctor, |request| {
            domain::assign_consultation(request, doctor)
        })
        .await
    }

    async fn update_consultation(
        &self,
        request_id: i64,
        input: &CreateConsultationRequest,
        doctor: &User,
    ) -> WorkflowResult<TestRequest> {
        let transition = Transition::UpdateConsultation;
        domain::check_permission(transition, doctor)?;
        domain::validate_consultation(input)?;

        let today = Utc::now().date_naive();
        self.execute(transition, request_id, doctor, |request| {
            domain::complete_consultation(request, input, doctor, today)
        })
        .await
    }
}
