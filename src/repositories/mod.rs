mod in_memory_flow_repository;
mod in_memory_request_repository;
mod traits;

pub use in_memory_flow_repository::InMemoryFlowRepository;
pub use in_memory_request_repository::InMemoryTestRequestRepository;
pub use traits::{TestRequestFlowRepository, TestRequestRepository};
