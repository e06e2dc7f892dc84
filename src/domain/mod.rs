//! Domain logic for the test request workflow.
//!
//! The state machine follows a linear progression:
//! INITIATED → LAB_TEST_IN_PROGRESS → LAB_TEST_COMPLETED → DIAGNOSIS_IN_PROCESS → COMPLETED
//!
//! `transitions` holds the transition table and its guards, `validation`
//! checks completion payloads, and `actions` computes the next request.

pub mod actions;
pub mod transitions;
pub mod validation;

pub use actions::{assign_consultation, assign_lab_test, complete_consultation, complete_lab_test};
pub use transitions::{
    check_ownership, check_permission, check_precondition, Transition, TRANSITIONS,
};
pub use validation::{validate_consultation, validate_lab_result};
