//! Driven port over the document collection holding user records.
//!
//! Only [`crate::domain::UsersService`] holds an implementation of this port;
//! HTTP adapters reach users through the driving ports instead.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user collection adapters.
    pub enum UserPersistenceError {
        /// The named connection or collection is not available.
        Connection { message: String } => "user collection connection failed: {message}",
        /// Reading or writing a document failed.
        Query { message: String } => "user collection query failed: {message}",
        /// A stored document could not be decoded into a user.
        Corrupt { id: String, message: String } => "user document {id} is corrupt: {message}",
    }
}

/// Collection operations the users service relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCollection: Send + Sync {
    /// Insert a new user document.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch every user document in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Replace an existing document. Returns `false` when no document matched.
    async fn replace(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Delete a document. Returns `false` when no document matched.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
