//! The test request state machine.
//!
//! Each workflow operation is a `Transition` with a fixed source status,
//! target status and required role. Guards here are pure: they look at a
//! request and a user and either allow the transition or return the error
//! the caller should report.

use crate::error::{WorkflowError, WorkflowResult};
use crate::models::{RequestStatus, Role, TestRequest, User};
use std::fmt;

/// A workflow operation that advances a test request by one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    AssignForLabTest,
    UpdateLabTest,
    AssignForConsultation,
    UpdateConsultation,
}

/// All transitions, in workflow order.
pub const TRANSITIONS: &[Transition] = &[
    Transition::AssignForLabTest,
    Transition::UpdateLabTest,
    Transition::AssignForConsultation,
    Transition::UpdateConsultation,
];

impl Transition {
    pub fn name(self) -> &'static str {
        match self {
            Transition::AssignForLabTest => "assign_for_lab_test",
            Transition::UpdateLabTest => "update_lab_test",
            Transition::AssignForConsultation => "assign_for_consultation",
            Transition::UpdateConsultation => "update_consultation",
        }
    }

    /// Status a request must be in for this transition to apply.
    pub fn from_status(self) -> RequestStatus {
        match self {
            Transition::AssignForLabTest => RequestStatus::Initiated,
            Transition::UpdateLabTest => RequestStatus::LabTestInProgress,
            Transition::AssignForConsultation => RequestStatus::LabTestCompleted,
            Transition::UpdateConsultation => RequestStatus::DiagnosisInProcess,
        }
    }

    /// Status a request is in after this transition.
    pub fn to_status(self) -> RequestStatus {
        match self {
            Transition::AssignForLabTest => RequestStatus::LabTestInProgress,
            Transition::UpdateLabTest => RequestStatus::LabTestCompleted,
            Transition::AssignForConsultation => RequestStatus::DiagnosisInProcess,
            Transition::UpdateConsultation => RequestStatus::Completed,
        }
    }

    pub fn required_role(self) -> Role {
        match self {
            Transition::AssignForLabTest | Transition::UpdateLabTest => Role::Tester,
            Transition::AssignForConsultation | Transition::UpdateConsultation => Role::Doctor,
        }
    }

    /// The transition that leaves `status`, if any.
    pub fn leaving(status: RequestStatus) -> Option<Transition> {
        TRANSITIONS
            .iter()
            .copied()
            .find(|transition| transition.from_status() == status)
    }

    /// Build the error reported when a request is found in `actual` instead
    /// of this transition's source status.
    pub fn invalid_from(self, request_id: i64, actual: RequestStatus) -> WorkflowError {
        WorkflowError::InvalidTransition {
            request_id,
            attempted: self.to_status(),
            expected: self.from_status(),
            actual,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reject users whose role does not match the transition.
pub fn check_permission(transition: Transition, user: &User) -> WorkflowResult<()> {
    let required = transition.required_role();
    if user.role != required {
        return Err(WorkflowError::PermissionDenied(format!(
            "{} requires role {}, user {} has role {}",
            transition, required, user.user_name, user.role
        )));
    }
    Ok(())
}

/// Reject requests that are not in the transition's source status.
pub fn check_precondition(transition: Transition, request: &TestRequest) -> WorkflowResult<()> {
    if request.status != transition.from_status() {
        return Err(transition.invalid_from(request.request_id, request.status));
    }
    Ok(())
}

/// Reject completion by anyone other than the user who took the request.
///
/// Assignments have no owner yet and always pass. A completion on a request
/// without a sub-record also passes; the acting user becomes the owner.
pub fn check_ownership(
    transition: Transition,
    request: &TestRequest,
    user: &User,
) -> WorkflowResult<()> {
    let owner = match transition {
        Transition::AssignForLabTest | Transition::AssignForConsultation => None,
        Transition::UpdateLabTest => request.lab_result.as_ref().map(|r| &r.tester),
        Transition::UpdateConsultation => request.consultation.as_ref().map(|c| &c.doctor),
    };

    match owner {
        Some(owner) if !owner.is_same_as(user) => Err(WorkflowError::PermissionDenied(format!(
            "request {} is assigned to {}, not {}",
            request.request_id, owner.user_name, user.user_name
        ))),
        _ => Ok(()),
    }
}
