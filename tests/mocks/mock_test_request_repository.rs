use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use upstac_workflow::error::{RepositoryError, RepositoryResult};
use upstac_workflow::models::{RequestStatus, TestRequest};
use upstac_workflow::repositories::TestRequestRepository;

/// Mock test request repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockTestRequestRepository {
    requests: Arc<Mutex<HashMap<i64, TestRequest>>>,
    stale_reads: Arc<Mutex<HashMap<i64, TestRequest>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockTestRequestRepository {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
            stale_reads: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_request(&self, request: TestRequest) {
        let mut requests = self.requests.lock().unwrap();
        requests.insert(request.request_id, request);
    }

    pub fn add_requests(&self, requests_list: Vec<TestRequest>) {
        let mut requests = self.requests.lock().unwrap();
        for request in requests_list {
            requests.insert(request.request_id, request);
        }
    }

    /// Current stored copy, bypassing call tracking.
    pub fn stored(&self, request_id: i64) -> Option<TestRequest> {
        self.requests.lock().unwrap().get(&request_id).cloned()
    }

    /// Make the next `find_by_id` for this request return `snapshot`
    /// instead of the stored copy, as if another writer committed right
    /// after the read.
    pub fn serve_stale_once(&self, snapshot: TestRequest) {
        let mut stale = self.stale_reads.lock().unwrap();
        stale.insert(snapshot.request_id, snapshot);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn sorted(mut requests: Vec<TestRequest>) -> Vec<TestRequest> {
        requests.sort_by_key(|request| request.request_id);
        requests
    }
}

impl Default for MockTestRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TestRequestRepository for MockTestRequestRepository {
    async fn find_by_id(&self, request_id: i64) -> RepositoryResult<TestRequest> {
        self.track_call("find_by_id");

        if let Some(snapshot) = self.stale_reads.lock().unwrap().remove(&request_id) {
            return Ok(snapshot);
        }

        let requests = self.requests.lock().unwrap();
        requests
            .get(&request_id)
            .cloned()
            .ok_or(RepositoryError::NotFound(request_id))
    }

    async fn find_by_status(&self, status: RequestStatus) -> RepositoryResult<Vec<TestRequest>> {
        self.track_call("find_by_status");

        let requests = self.requests.lock().unwrap();
        Ok(Self::sorted(
            requests
                .values()
                .filter(|request| request.status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<TestRequest>> {
        self.track_call("find_all");

        let requests = self.requests.lock().unwrap();
        Ok(Self::sorted(requests.values().cloned().collect()))
    }

    async fn insert(&self, request: &TestRequest) -> RepositoryResult<TestRequest> {
        self.track_call("insert");

        let mut requests = self.requests.lock().unwrap();
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
        self.track_call("save");

        let mut requests = self.requests.lock().unwrap();
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
        Ok(updated)
    }
}
