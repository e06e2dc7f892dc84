use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{RequestStatus, TestRequest};
use crate::repositories::traits::TestRequestRepository;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;

/// Test request repository held in process memory.
///
/// Every `save` is a compare-and-swap on the stored version under the write
/// lock, so two writers that read the same version cannot both succeed.
#[derive(Default)]
pub struct InMemoryTestRequestRepository {
    requests: RwLock<BTreeMap<i64, TestRequest>>,
}

impl InMemoryTestRequestRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository preloaded with `requests`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if two requests share an ID and
    /// `RepositoryError::Seed` if a request carries a sub-record its status
    /// does not allow.
    pub fn with_requests(requests: Vec<TestRequest>) -> RepositoryResult<Self> {
        let mut map = BTreeMap::new();
        for request in requests {
            if !request.is_consistent() {
                return Err(RepositoryError::Seed(format!(
                    "request {} in state {} carries a sub-record it cannot have yet",
                    request.request_id, request.status
                )));
            }
            let request_id = request.request_id;
            if map.insert(request_id, request).is_some() {
                return Err(RepositoryError::Duplicate(request_id));
            }
        }
        Ok(Self {
            requests: RwLock::new(map),
        })
    }

    /// Load requests from a JSON file containing an array of test requests.
    pub fn from_json_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RepositoryError::Seed(format!("{}: {}", path.display(), e)))?;
        let requests: Vec<TestRequest> = serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::Seed(format!("{}: {}", path.display(), e)))?;
        Self::with_requests(requests)
    }
}

#[async_trait]
impl TestRequestRepository for InMemoryTestRequestRepository {
    async fn find_by_id(&self, request_id: i64) -> RepositoryResult<TestRequest> {
        let requests = self.requests.read().await;
        requests
            .get(&request_id)
            .cloned()
            .ok_or(RepositoryError::NotFound(request_id))
    }

    async fn find_by_status(&self, status: RequestStatus) -> RepositoryResult<Vec<TestRequest>> {
        let requests = self.requests.read().await;
        Ok(requests
            .values()
            .filter(|request| request.status == status)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<TestRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.values().cloned().collect())
    }

    async fn insert(&self, request: &TestRequest) -> RepositoryResult<TestRequest> {
        let mut requests = self.requests.write().await;
        if requests.contains_key(&request.request_id) {
            return Err(RepositoryError::Duplicate(request.request_id));
        }
        requests.insert(request.request_id, request.clone());
        Ok(request.clone())
    }

    async fn save(
        &self,
        request: &TestRequest,
        expected_version: u64,
    ) -> RepositoryResult<TestRequest> {
        let mut requests = self.requests.write().await;
        let stored = requests
            .get_mut(&request.request_id)
            .ok_or(RepositoryError::NotFound(request.request_id))?;

        if stored.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                request_id: request.request_id,
                expected: expected_version,
                found: stored.version,
            });
        }

        let mut updated = request.clone();
        updated.version = expected_version + 1;
        *stored = updated.clone();
        debug!(
            request_id = updated.request_id,
            version = updated.version,
            "Saved test request"
        );
        Ok(updated)
    }
}
