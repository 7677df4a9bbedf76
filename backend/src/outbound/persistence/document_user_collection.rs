//! `UserCollection` adapter backed by the document store.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::domain::ports::{UserCollection, UserPersistenceError};
use crate::domain::{User, UserId};

use super::document_store::{Collection, StoreError};

/// Schema name under which user documents are registered.
pub const USER_SCHEMA: &str = "User";

/// Stores users as camelCase JSON documents keyed by their id.
#[derive(Debug, Clone)]
pub struct DocumentUserCollection {
    collection: Collection,
}

impl DocumentUserCollection {
    /// Wrap a bound collection handle.
    #[must_use]
    pub const fn new(collection: Collection) -> Self {
        Self { collection }
    }
}

fn map_store_error(error: StoreError) -> UserPersistenceError {
    match error {
        StoreError::Poisoned { collection } => {
            UserPersistenceError::connection(format!("{collection} lock poisoned"))
        }
        other @ StoreError::DuplicateKey { .. } => UserPersistenceError::query(other.to_string()),
    }
}

fn encode(user: &User) -> Result<Value, UserPersistenceError> {
    serde_json::to_value(user).map_err(|err| UserPersistenceError::query(err.to_string()))
}

fn decode(id: &str, document: Value) -> Result<User, UserPersistenceError> {
    serde_json::from_value(document).map_err(|err| {
        warn!(user_id = id, error = %err, "stored user document failed to decode");
        UserPersistenceError::corrupt(id, err.to_string())
    })
}

#[async_trait]
impl UserCollection for DocumentUserCollection {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.collection
            .insert_one(user.id().as_ref(), encode(user)?)
            .map_err(map_store_error)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.collection
            .find()
            .map_err(map_store_error)?
            .into_iter()
            .map(|(id, document)| decode(&id, document))
            .collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.collection
            .find_one(id.as_ref())
            .map_err(map_store_error)?
            .map(|document| decode(id.as_ref(), document))
            .transpose()
    }

    async fn replace(&self, user: &User) -> Result<bool, UserPersistenceError> {
        self.collection
            .replace_one(user.id().as_ref(), encode(user)?)
            .map_err(map_store_error)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        self.collection
            .delete_one(id.as_ref())
            .map_err(map_store_error)
    }
}
