//! Consultation model and the payload used to complete a consultation.

use super::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recommendation a doctor gives when closing a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoctorSuggestion {
    NoIssues,
    HomeQuarantine,
    Admit,
}

impl DoctorSuggestion {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorSuggestion::NoIssues => "NO_ISSUES",
            DoctorSuggestion::HomeQuarantine => "HOME_QUARANTINE",
            DoctorSuggestion::Admit => "ADMIT",
        }
    }
}

impl fmt::Display for DoctorSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoctorSuggestion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NO_ISSUES" => Ok(DoctorSuggestion::NoIssues),
            "HOME_QUARANTINE" => Ok(DoctorSuggestion::HomeQuarantine),
            "ADMIT" => Ok(DoctorSuggestion::Admit),
            other => Err(format!("Unknown doctor suggestion: {}", other)),
        }
    }
}

/// Consultation attached to a test request once a doctor picks it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    /// Doctor who owns the consultation
    pub doctor: User,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<DoctorSuggestion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<NaiveDate>,
}

impl Consultation {
    /// Create an empty consultation owned by `doctor`.
    pub fn assigned_to(doctor: User) -> Self {
        Self {
            doctor,
            suggestion: None,
            comments: None,
            updated_on: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.suggestion.is_some()
    }
}

/// Payload submitted by a doctor to complete a consultation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateConsultationRequest {
    pub suggestion: Option<DoctorSuggestion>,
    pub comments: String,
}
