//! Identification of the acting user.
//!
//! Authentication is handled outside this crate; the workflow only needs to
//! know who is acting and in which role.

use crate::error::WorkflowResult;
use crate::models::User;
use async_trait::async_trait;

/// Supplies the user on whose behalf the current call runs.
#[async_trait]
pub trait UserProvider: Send + Sync {
    async fn current_user(&self) -> WorkflowResult<User>;
}

/// A provider that always returns the same user.
///
/// Used by the MCP server, where one process serves one configured user.
#[derive(Debug, Clone)]
pub struct StaticUserProvider {
    user: User,
}

impl StaticUserProvider {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

#[async_trait]
impl UserProvider for StaticUserProvider {
    async fn current_user(&self) -> WorkflowResult<User> {
        Ok(self.user.clone())
    }
}
