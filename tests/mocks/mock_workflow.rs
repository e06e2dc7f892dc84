use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use upstac_workflow::error::WorkflowResult;
use upstac_workflow::models::{
    CreateConsultationRequest, CreateLabResult, TestRequest, User,
};
use upstac_workflow::services::TestRequestWorkflow;

/// Stubbed workflow for controller tests.
///
/// Each operation returns whatever was stubbed for its (operation, id)
/// pair and records the user it was called with.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockWorkflow {
    stubs: Arc<Mutex<HashMap<(&'static str, i64), WorkflowResult<TestRequest>>>>,
    calls: Arc<Mutex<Vec<(&'static str, i64, User)>>>,
}

#[allow(dead_code)]
impl MockWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(&self, operation: &'static str, request_id: i64, outcome: WorkflowResult<TestRequest>) {
        let mut stubs = self.stubs.lock().unwrap();
        stubs.insert((operation, request_id), outcome);
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<(&'static str, i64, User)> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, operation: &'static str, request_id: i64, user: &User) -> WorkflowResult<TestRequest> {
        self.calls
            .lock()
            .unwrap()
            .push((operation, request_id, user.clone()));

        let stubs = self.stubs.lock().unwrap();
        match stubs.get(&(operation, request_id)) {
            Some(outcome) => outcome.clone(),
            None => panic!("No stub for {}({})", operation, request_id),
        }
    }
}

#[async_trait]
impl TestRequestWorkflow for MockWorkflow {
    async fn assign_for_lab_test(&self, request_id: i64, tester: &User) -> WorkflowResult<TestRequest> {
        self.answer("assign_for_lab_test", request_id, tester)
    }

    async fn update_lab_test(
        &self,
        request_id: i64,
        _input: &CreateLabResult,
        tester: &User,
    ) -> WorkflowResult<TestRequest> {
        self.answer("update_lab_test", request_id, tester)
    }

    async fn assign_for_consultation(
        &self,
        request_id: i64,
        doctor: &User,
    ) -> WorkflowResult<TestRequest> {
        self.answer("assign_for_consultation", request_id, doctor)
    }

    async fn update_consultation(
        &self,
        request_id: i64,
        _input: &CreateConsultationRequest,
        doctor: &User,
    ) -> WorkflowResult<TestRequest> {
        self.answer("update_consultation", request_id, doctor)
    }
}
