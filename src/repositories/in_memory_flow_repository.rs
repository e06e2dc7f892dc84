use crate::error::RepositoryResult;
use crate::models::TestRequestFlow;
use crate::repositories::traits::TestRequestFlowRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Append-only transition log held in process memory.
#[derive(Default)]
pub struct InMemoryFlowRepository {
    flows: RwLock<Vec<TestRequestFlow>>,
}

impl InMemoryFlowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TestRequestFlowRepository for InMemoryFlowRepository {
    async fn record(&self, flow: &TestRequestFlow) -> RepositoryResult<()> {
        self.flows.write().await.push(flow.clone());
        Ok(())
    }

    async fn find_by_request(&self, request_id: i64) -> RepositoryResult<Vec<TestRequestFlow>> {
        let flows = self.flows.read().await;
        Ok(flows
            .iter()
            .filter(|flow| flow.request_id == request_id)
            .cloned()
            .collect())
    }
}
