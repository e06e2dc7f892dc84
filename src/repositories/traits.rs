use crate::error::RepositoryResult;
use crate::models::*;
use async_trait::async_trait;

/// Repository for test requests.
///
/// Provides abstraction over request storage and retrieval,
/// enabling different implementations (in-memory, database, mock).
#[async_trait]
pub trait TestRequestRepository: Send + Sync {
    /// Retrieve a single request by ID.
    ///
    /// Returns `RepositoryError::NotFound` when no such request exists.
    async fn find_by_id(&self, request_id: i64) -> RepositoryResult<TestRequest>;

    /// Retrieve all requests currently in `status`, ordered by ID.
    async fn find_by_status(&self, status: RequestStatus) -> RepositoryResult<Vec<TestRequest>>;

    /// Retrieve every request, ordered by ID.
    async fn find_all(&self) -> RepositoryResult<Vec<TestRequest>>;

    /// Store a new request.
    async fn insert(&self, request: &TestRequest) -> RepositoryResult<TestRequest>;

    /// Replace a stored request if its stored version still equals
    /// `expected_version`.
    ///
    /// On success the stored copy carries `expected_version + 1` and is
    /// returned. Otherwise nothing is written and
    /// `RepositoryError::VersionConflict` is returned.
    async fn save(&self, request: &TestRequest, expected_version: u64)
        -> RepositoryResult<TestRequest>;
}

/// Repository for the transition audit trail.
#[async_trait]
pub trait TestRequestFlowRepository: Send + Sync {
    /// Append a transition record.
    async fn record(&self, flow: &TestRequestFlow) -> RepositoryResult<()>;

    /// Get all transitions of a request, oldest first.
    async fn find_by_request(&self, request_id: i64) -> RepositoryResult<Vec<TestRequestFlow>>;
}
