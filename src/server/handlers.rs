//! MCP tool handlers for the UpStac workflow server.
//!
//! This module exposes the lab and consultation controllers as MCP tools
//! using the rmcp SDK's tool_router pattern.

use crate::controllers::{ConsultationController, LabRequestController, ResponseStatusError};
use crate::domain::Transition;
use crate::models::{CreateConsultationRequest, CreateLabResult, DoctorSuggestion, TestStatus};
use crate::repositories::{TestRequestFlowRepository, TestRequestRepository};
use crate::services::{
    TestRequestQueryService, TestRequestQueryServiceImpl, TestRequestWorkflow,
    TestRequestWorkflowImpl,
};
use crate::session::UserProvider;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The UpStac MCP server exposing the test request workflow.
#[derive(Clone)]
pub struct UpstacMcpServer {
    lab_controller: LabRequestController,
    consultation_controller: ConsultationController,
    query_service: Arc<dyn TestRequestQueryService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for UpstacMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "upstac-workflow".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for UpStac COVID-19 test requests - lets lab testers and doctors move requests through lab testing and consultation.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct RequestIdParams {
    request_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateLabTestParams {
    request_id: i64,
    /// POSITIVE or NEGATIVE
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    blood_pressure: Option<String>,
    #[serde(default)]
    heart_beat: Option<String>,
    #[serde(default)]
    temperature: Option<String>,
    #[serde(default)]
    oxygen_level: Option<String>,
    #[serde(default)]
    comments: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateConsultationParams {
    request_id: i64,
    /// NO_ISSUES, HOME_QUARANTINE or ADMIT
    #[serde(default)]
    suggestion: Option<String>,
    #[serde(default)]
    comments: Option<String>,
}

// Controller errors keep their status so clients can tell 404 from 400
fn to_mcp_error(e: ResponseStatusError) -> McpError {
    let code = if e.is_client_error() {
        ErrorCode::INVALID_PARAMS
    } else {
        ErrorCode::INTERNAL_ERROR
    };
    McpError {
        code,
        message: Cow::from(e.reason),
        data: Some(serde_json::json!({ "status": e.status })),
    }
}

fn invalid_params(message: String) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message),
        data: None,
    }
}

fn internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(internal_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl UpstacMcpServer {
    /// Create a new UpStac MCP server.
    pub fn new(
        requests: Arc<dyn TestRequestRepository>,
        flows: Arc<dyn TestRequestFlowRepository>,
        users: Arc<dyn UserProvider>,
    ) -> Self {
        let query_service = Arc::new(TestRequestQueryServiceImpl::new(
            requests.clone(),
            flows.clone(),
        )) as Arc<dyn TestRequestQueryService>;

        let workflow =
            Arc::new(TestRequestWorkflowImpl::new(requests, flows)) as Arc<dyn TestRequestWorkflow>;

        let lab_controller =
            LabRequestController::new(query_service.clone(), workflow.clone(), users.clone());
        let consultation_controller =
            ConsultationController::new(query_service.clone(), workflow, users);

        Self {
            lab_controller,
            consultation_controller,
            query_service,
            tool_router: Self::tool_router(),
        }
    }

    /// List requests waiting for a lab test.
    #[tool(description = "List test requests waiting to be picked up for a lab test (status INITIATED)")]
    async fn list_pending_lab_tests(&self) -> Result<CallToolResult, McpError> {
        let requests = self
            .lab_controller
            .get_for_tests()
            .await
            .map_err(to_mcp_error)?;
        json_result(&requests)
    }

    /// List requests taken by the current tester.
    #[tool(description = "List test requests assigned to the current lab tester")]
    async fn list_my_lab_tests(&self) -> Result<CallToolResult, McpError> {
        let requests = self
            .lab_controller
            .get_for_tester()
            .await
            .map_err(to_mcp_error)?;
        json_result(&requests)
    }

    /// Take a request for lab testing.
    #[tool(
        description = "Assign an INITIATED test request to the current lab tester. Moves it to LAB_TEST_IN_PROGRESS."
    )]
    async fn assign_for_lab_test(
        &self,
        params: Parameters<RequestIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: assign_for_lab_test called");
        let request = self
            .lab_controller
            .assign_for_lab_test(params.request_id)
            .await
            .map_err(to_mcp_error)?;
        json_result(&request)
    }

    /// Record a lab result.
    #[tool(
        description = "Record the lab result (POSITIVE/NEGATIVE plus vitals) of a test request in LAB_TEST_IN_PROGRESS. Moves it to LAB_TEST_COMPLETED."
    )]
    async fn update_lab_test(
        &self,
        params: Parameters<UpdateLabTestParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: update_lab_test called");
        tracing::debug!(
            "Parameters: request_id={}, result={:?}",
            params.request_id,
            params.result
        );

        let result = params
            .result
            .as_deref()
            .map(str::parse::<TestStatus>)
            .transpose()
            .map_err(invalid_params)?;

        let input = CreateLabResult {
            result,
            blood_pressure: params.blood_pressure.unwrap_or_default(),
            heart_beat: params.heart_beat.unwrap_or_default(),
            temperature: params.temperature.unwrap_or_default(),
            oxygen_level: params.oxygen_level.unwrap_or_default(),
            comments: params.comments.unwrap_or_default(),
        };

        let request = self
            .lab_controller
            .update_lab_test(params.request_id, input)
            .await
            .map_err(to_mcp_error)?;
        json_result(&request)
    }

    /// List requests waiting for a consultation.
    #[tool(description = "List test requests whose lab test is complete and that wait for a doctor (status LAB_TEST_COMPLETED)")]
    async fn list_pending_consultations(&self) -> Result<CallToolResult, McpError> {
        let requests = self
            .consultation_controller
            .get_for_consultations()
            .await
            .map_err(to_mcp_error)?;
        json_result(&requests)
    }

    /// List requests taken by the current doctor.
    #[tool(description = "List test requests assigned to the current doctor")]
    async fn list_my_consultations(&self) -> Result<CallToolResult, McpError> {
        let requests = self
            .consultation_controller
            .get_for_doctor()
            .await
            .map_err(to_mcp_error)?;
        json_result(&requests)
    }

    /// Take a request for consultation.
    #[tool(
        description = "Assign a LAB_TEST_COMPLETED test request to the current doctor. Moves it to DIAGNOSIS_IN_PROCESS."
    )]
    async fn assign_for_consultation(
        &self,
        params: Parameters<RequestIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: assign_for_consultation called");
        let request = self
            .consultation_controller
            .assign_for_consultation(params.request_id)
            .await
            .map_err(to_mcp_error)?;
        json_result(&request)
    }

    /// Close a consultation with a suggestion.
    #[tool(
        description = "Record the doctor's suggestion for a test request in DIAGNOSIS_IN_PROCESS. Moves it to COMPLETED."
    )]
    async fn update_consultation(
        &self,
        params: Parameters<UpdateConsultationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: update_consultation called");
        tracing::debug!(
            "Parameters: request_id={}, suggestion={:?}",
            params.request_id,
            params.suggestion
        );

        let suggestion = params
            .suggestion
            .as_deref()
            .map(str::parse::<DoctorSuggestion>)
            .transpose()
            .map_err(invalid_params)?;

        let input = CreateConsultationRequest {
            suggestion,
            comments: params.comments.unwrap_or_default(),
        };

        let request = self
            .consultation_controller
            .update_consultation(params.request_id, input)
            .await
            .map_err(to_mcp_error)?;
        json_result(&request)
    }

    /// Show how a request moved through the workflow.
    #[tool(description = "Get the status history of a test request: every transition with who made it and when")]
    async fn get_request_flow(
        &self,
        params: Parameters<RequestIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let request = self
            .query_service
            .find_by_id(params.request_id)
            .await
            .map_err(|e| to_mcp_error(e.into()))?;
        let flows = self
            .query_service
            .flow_of(params.request_id)
            .await
            .map_err(|e| to_mcp_error(e.into()))?;

        let response = serde_json::json!({
            "request_id": request.request_id,
            "status": request.status,
            "next_step": Transition::leaving(request.status).map(Transition::name),
            "history": flows,
        });
        json_result(&response)
    }
}
