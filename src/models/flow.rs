//! Audit record of a single workflow transition.

use super::{RequestStatus, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One step a test request took through the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRequestFlow {
    pub request_id: i64,
    pub from_status: RequestStatus,
    pub to_status: RequestStatus,
    pub changed_by: User,
    pub happened_on: DateTime<Utc>,
}

impl TestRequestFlow {
    pub fn new(
        request_id: i64,
        from_status: RequestStatus,
        to_status: RequestStatus,
        changed_by: User,
    ) -> Self {
        Self {
            request_id,
            from_status,
            to_status,
            changed_by,
            happened_on: Utc::now(),
        }
    }
}
