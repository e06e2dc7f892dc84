//! UpStac Workflow - test request tracking core for the UpStac COVID-19 testing system.
//!
//! A test request moves through a fixed sequence of states as lab testers and
//! doctors act on it. This library owns that state machine, the checks that
//! guard each transition, and thin adapters that expose it to a transport.
//!
//! # Architecture
//!
//! - **models**: Test requests, lab results, consultations, users and the transition log
//! - **domain**: The status state machine, its guards and payload validation
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Storage traits and in-memory implementations
//! - **session**: Identification of the acting user
//! - **services**: The workflow and read-side query services
//! - **controllers**: Map service outcomes to status codes and reason strings
//! - **server**: MCP protocol server

pub mod config;
pub mod controllers;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod session;

pub use config::Config;
pub use controllers::{ConsultationController, LabRequestController, ResponseStatusError};
pub use domain::Transition;
pub use error::{ConfigError, RepositoryError, WorkflowError};
pub use models::{
    Consultation, CreateConsultationRequest, CreateLabResult, DoctorSuggestion, LabResult,
    RequestStatus, Role, TestRequest, TestRequestFlow, TestStatus, User,
};
pub use server::UpstacMcpServer;
pub use services::{
    TestRequestQueryService, TestRequestQueryServiceImpl, TestRequestWorkflow,
    TestRequestWorkflowImpl,
};
pub use session::{StaticUserProvider, UserProvider};
