//! Driving port for user-facing reads.
//!
//! HTTP handlers use this port so they never import persistence concerns.

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every stored user.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Return a single user, or a not-found error.
    async fn get_user(&self, id: &UserId) -> Result<User, DomainError>;
}
