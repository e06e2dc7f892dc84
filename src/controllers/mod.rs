//! Transport-facing controllers.
//!
//! Controllers resolve the acting user, call the workflow or query service,
//! and turn `WorkflowError` into a `ResponseStatusError` that any transport
//! can render.

mod consultation;
mod lab_request;
pub mod response;

pub use consultation::ConsultationController;
pub use lab_request::LabRequestController;
pub use response::{ControllerResult, ResponseStatusError};
