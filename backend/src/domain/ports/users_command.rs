//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserDraft, UserId};

/// Domain use-case port for creating, renaming and removing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user with a freshly generated identifier.
    async fn create_user(&self, draft: UserDraft) -> Result<User, DomainError>;

    /// Replace the display name of an existing user.
    async fn update_user(&self, id: &UserId, draft: UserDraft) -> Result<User, DomainError>;

    /// Remove an existing user.
    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError>;
}
