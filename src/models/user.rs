//! User model and workflow roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a user acts in when driving a test request through the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Lab technician: runs lab tests
    Tester,
    /// Doctor: runs consultations
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tester => "TESTER",
            Role::Doctor => "DOCTOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tester" => Ok(Role::Tester),
            "doctor" => Ok(Role::Doctor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// An authenticated user of the system.
///
/// Ownership checks compare users by `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub role: Role,
}

impl User {
    pub fn new(id: i64, user_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            role,
        }
    }

    /// Whether this user is the same account as `other`.
    pub fn is_same_as(&self, other: &User) -> bool {
        self.id == other.id
    }
}
