//! Lab result model and the payload used to complete a lab test.

use super::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a COVID-19 lab test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    Positive,
    Negative,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Positive => "POSITIVE",
            TestStatus::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" => Ok(TestStatus::Positive),
            "NEGATIVE" => Ok(TestStatus::Negative),
            other => Err(format!("Unknown test status: {}", other)),
        }
    }
}

/// Lab result attached to a test request.
///
/// An empty shell (no outcome, no vitals) is attached when a tester takes
/// the request; the remaining fields are filled in when the test completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    /// Tester who took the request
    pub tester: User,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TestStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_beat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<NaiveDate>,
}

impl LabResult {
    /// Create an empty lab result owned by `tester`.
    pub fn assigned_to(tester: User) -> Self {
        Self {
            tester,
            result: None,
            blood_pressure: None,
            heart_beat: None,
            temperature: None,
            oxygen_level: None,
            comments: None,
            updated_on: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }
}

/// Payload submitted by a tester to complete a lab test.
///
/// `result` is optional here so a missing outcome can be represented and
/// rejected by validation rather than at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateLabResult {
    pub result: Option<TestStatus>,
    pub blood_pressure: String,
    pub heart_beat: String,
    pub temperature: String,
    pub oxygen_level: String,
    pub comments: String,
}
