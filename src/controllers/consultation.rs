//! Controller for doctors.

use super::response::ControllerResult;
use crate::models::{CreateConsultationRequest, RequestStatus, TestRequest};
use crate::services::{TestRequestQueryService, TestRequestWorkflow};
use crate::session::UserProvider;
use std::sync::Arc;
use tracing::{error, info};

/// Doctor-side entry points: the queue of tested requests, the current
/// doctor's consultations, and the two consultation transitions.
#[derive(Clone)]
pub struct ConsultationController {
    query_service: Arc<dyn TestRequestQueryService>,
    workflow: Arc<dyn TestRequestWorkflow>,
    users: Arc<dyn UserProvider>,
}

impl ConsultationController {
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

    /// Requests whose lab test is done and that await a doctor.
    pub async fn get_for_consultations(&self) -> ControllerResult<Vec<TestRequest>> {
        Ok(self
            .query_service
            .find_by(RequestStatus::LabTestCompleted)
            .await?)
    }

    /// Requests taken by the current doctor.
    pub async fn get_for_doctor(&self) -> ControllerResult<Vec<TestRequest>> {
        let doctor = self.users.current_user().await?;
        Ok(self.query_service.find_by_doctor(&doctor).await?)
    }

    pub async fn assign_for_consultation(&self, request_id: i64) -> ControllerResult<TestRequest> {
        let doctor = self.users.current_user().await?;
        info!(request_id, doctor = %doctor.user_name, "assign_for_consultation");

        self.workflow
            .assign_for_consultation(request_id, &doctor)
            .await
            .map_err(|e| {
                error!(request_id, "assign_for_consultation failed: {}", e);
                e.into()
            })
    }

    pub async fn update_consultation(
        &self,
        request_id: i64,
        input: CreateConsultationRequest,
    ) -> ControllerResult<TestRequest> {
        let doctor = self.users.current_user().await?;
        info!(request_id, doctor = %doctor.user_name, "update_consultation");

        self.workflow
            .update_consultation(request_id, &input, &doctor)
            .await
            .map_err(|e| {
                error!(request_id, "update_consultation failed: {}", e);
                e.into()
            })
    }
}
