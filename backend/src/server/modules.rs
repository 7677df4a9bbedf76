//! Feature module registration.
//!
//! Each module binds its collection into a named connection and builds the
//! service that owns it. The composition is explicit: the result is handed to
//! the router via [`crate::inbound::http::state::HttpState`].

use std::sync::Arc;

use tracing::info;

use crate::domain::UsersService;
use crate::domain::ports::{UsersCommand, UsersQuery};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DocumentStore, DocumentUserCollection, MAIN_CONNECTION, StoreError, USER_SCHEMA,
};

/// Users feature: `User` collection in the `main` connection behind a
/// [`UsersService`].
pub struct UsersModule {
    service: Arc<UsersService<DocumentUserCollection>>,
}

impl UsersModule {
    /// Bind the `User` collection and build the service over it.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the connection or collection cannot be
    /// bound.
    pub fn register(store: &DocumentStore) -> Result<Self, StoreError> {
        let collection = store.connection(MAIN_CONNECTION)?.collection(USER_SCHEMA)?;
        info!(
            connection = MAIN_CONNECTION,
            schema = USER_SCHEMA,
            "users module registered"
        );
        let adapter = Arc::new(DocumentUserCollection::new(collection));
        Ok(Self {
            service: Arc::new(UsersService::new(adapter)),
        })
    }

    /// Read port exported to other modules and the HTTP adapter.
    #[must_use]
    pub fn query(&self) -> Arc<dyn UsersQuery> {
        self.service.clone()
    }

    /// Write port exported to the HTTP adapter.
    #[must_use]
    pub fn command(&self) -> Arc<dyn UsersCommand> {
        self.service.clone()
    }
}

/// Build the HTTP state from every registered module.
///
/// # Errors
/// Returns [`StoreError`] when a module fails to register.
pub fn build_http_state(store: &DocumentStore) -> Result<HttpState, StoreError> {
    let users = UsersModule::register(store)?;
    Ok(HttpState::new(users.query(), users.command()))
}
