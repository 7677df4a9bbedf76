//! Users service: the only holder of the user collection.
//!
//! Implements the driving ports on top of a [`UserCollection`], adding id
//! generation, draft validation and not-found mapping. No further business
//! rules apply.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{UserCollection, UsersCommand, UsersQuery};
use crate::domain::{DomainError, User, UserDraft, UserId, UserValidationError};

/// CRUD service over a user collection.
pub struct UsersService<C: ?Sized> {
    collection: Arc<C>,
}

impl<C> UsersService<C>
where
    C: UserCollection + ?Sized,
{
    /// Wrap a collection adapter.
    #[must_use]
    pub const fn new(collection: Arc<C>) -> Self {
        Self { collection }
    }
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::not_found(format!("user {id} not found")).with_details(json!({ "id": id.as_ref() }))
}

/// Map a validation failure onto an invalid-request error naming the field.
#[must_use]
pub fn map_user_validation_error(err: &UserValidationError) -> DomainError {
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

#[async_trait]
impl<C> UsersQuery for UsersService<C>
where
    C: UserCollection + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.collection.find_all().await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, DomainError> {
        self.collection
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<C> UsersCommand for UsersService<C>
where
    C: UserCollection + ?Sized,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, DomainError> {
        let display_name = draft
            .validate()
            .map_err(|err| map_user_validation_error(&err))?;
        let user = User::new(UserId::random(), display_name);
        self.collection.insert(&user).await?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, draft: UserDraft) -> Result<User, DomainError> {
        let display_name = draft
            .validate()
            .map_err(|err| map_user_validation_error(&err))?;
        let user = User::new(id.clone(), display_name);
        if !self.collection.replace(&user).await? {
            return Err(not_found(id));
        }
        debug!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        if !self.collection.delete(id).await? {
            return Err(not_found(id));
        }
        debug!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockUserCollection, UserPersistenceError};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    const ADA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[fixture]
    fn ada() -> User {
        User::try_from_strings(ADA_ID, "Ada Lovelace").expect("fixture user")
    }

    fn service(collection: MockUserCollection) -> UsersService<MockUserCollection> {
        UsersService::new(Arc::new(collection))
    }

    fn draft(name: &str) -> UserDraft {
        UserDraft {
            display_name: name.to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn list_users_returns_collection_contents(ada: User) {
        let mut collection = MockUserCollection::new();
        let stored = ada.clone();
        collection
            .expect_find_all()
            .times(1)
            .returning(move || Ok(vec![stored.clone()]));

        let users = service(collection).list_users().await.expect("users");
        assert_eq!(users, vec![ada]);
    }

    #[rstest]
    #[tokio::test]
    async fn get_user_maps_missing_document_to_not_found(ada: User) {
        let mut collection = MockUserCollection::new();
        collection
            .expect_find_by_id()
            .with(eq(ada.id().clone()))
            .returning(|_| Ok(None));

        let err = service(collection)
            .get_user(ada.id())
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.details(), Some(&json!({ "id": ADA_ID })));
    }

    #[rstest]
    #[tokio::test]
    async fn create_user_generates_id_and_inserts() {
        let mut collection = MockUserCollection::new();
        collection
            .expect_insert()
            .withf(|user| user.display_name().as_ref() == "Grace Hopper")
            .times(1)
            .returning(|_| Ok(()));

        let user = service(collection)
            .create_user(draft("Grace Hopper"))
            .await
            .expect("created");
        assert_eq!(user.display_name().as_ref(), "Grace Hopper");
    }

    #[rstest]
    #[tokio::test]
    async fn create_user_rejects_invalid_draft_without_touching_collection() {
        let mut collection = MockUserCollection::new();
        collection.expect_insert().never();

        let err = service(collection)
            .create_user(draft("no"))
            .await
            .expect_err("invalid draft");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": "displayName" })));
    }

    #[rstest]
    #[tokio::test]
    async fn update_user_reports_not_found_when_nothing_replaced(ada: User) {
        let mut collection = MockUserCollection::new();
        collection.expect_replace().returning(|_| Ok(false));

        let err = service(collection)
            .update_user(ada.id(), draft("Countess Ada"))
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn update_user_returns_renamed_user(ada: User) {
        let mut collection = MockUserCollection::new();
        collection.expect_replace().returning(|_| Ok(true));

        let user = service(collection)
            .update_user(ada.id(), draft("Countess Ada"))
            .await
            .expect("updated");
        assert_eq!(user.id(), ada.id());
        assert_eq!(user.display_name().as_ref(), "Countess Ada");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_user_reports_not_found_when_nothing_deleted(ada: User) {
        let mut collection = MockUserCollection::new();
        collection.expect_delete().returning(|_| Ok(false));

        let err = service(collection)
            .delete_user(ada.id())
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn persistence_failures_become_internal_errors() {
        let mut collection = MockUserCollection::new();
        collection
            .expect_find_all()
            .returning(|| Err(UserPersistenceError::query("lock poisoned")));

        let err = service(collection)
            .list_users()
            .await
            .expect_err("query failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
