//! Controller for lab technicians.

use super::response::ControllerResult;
use crate::models::{CreateLabResult, RequestStatus, TestRequest};
use crate::services::{TestRequestQueryService, TestRequestWorkflow};
use crate::session::UserProvider;
use std::sync::Arc;
use tracing::{error, info};

/// Lab-side entry points: the queue of new requests, the current tester's
/// own work, and the two lab transitions.
#[derive(Clone)]
pub struct LabRequestController {
    query_service: Arc<dyn TestRequestQueryService>,
    workflow: Arc<dyn TestRequestWorkflow>,
    users: Arc<dyn UserProvider>,
}

impl LabRequestController {
    pub fn new(
        query_service: Arc<dyn TestRequestQueryService>,
        workflow: Arc<dyn TestRequestWorkflow>,
        users: Arc<dyn UserProvider>,
    ) -> Self {
        Self {
            query_service,
            workflow,
            users,
        }
    }

    /// Requests waiting for a tester.
    pub async fn get_for_tests(&self) -> ControllerResult<Vec<TestRequest>> {
        Ok(self.query_service.find_by(RequestStatus::Initiated).await?)
    }

    /// Requests taken by the current tester.
    pub async fn get_for_tester(&self) -> ControllerResult<Vec<TestRequest>> {
        let tester = self.users.current_user().await?;
        Ok(self.query_service.find_by_tester(&tester).await?)
    }

    pub async fn assign_for_lab_test(&self, request_id: i64) -> ControllerResult<TestRequest> {
        let tester = self.users.current_user().await?;
        info!(request_id, tester = %tester.user_name, "assign_for_lab_test");

        self.workflow
            .assign_for_lab_test(request_id, &tester)
            .await
            .map_err(|e| {
                error!(request_id, "assign_for_lab_test failed: {}", e);
                e.into()
            })
    }

    pub async fn update_lab_test(
        &self,
        request_id: i64,
        input: CreateLabResult,
    ) -> ControllerResult<TestRequest> {
        let tester = self.users.current_user().await?;
        info!(request_id, tester = %tester.user_name, "update_lab_test");

        self.workflow
            .update_lab_test(request_id, &input, &tester)
            .await
            .map_err(|e| {
                error!(request_id, "update_lab_test failed: {}", e);
                e.into()
            })
    }
}
