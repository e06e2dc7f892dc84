//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and controllers. They provide a clean boundary between the
//! transport adapters and the data access layer.

mod query_service;
mod workflow_service;

pub use query_service::{TestRequestQueryService, TestRequestQueryServiceImpl};
pub use workflow_service::{TestRequestWorkflow, TestRequestWorkflowImpl};
