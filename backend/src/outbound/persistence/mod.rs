//! Persistence adapters.
//!
//! The document store is the infrastructure collaborator; feature adapters
//! such as [`DocumentUserCollection`] bind one of its collections and
//! implement a domain port over it.

mod document_store;
mod document_user_collection;

pub use document_store::{Collection, Connection, DocumentStore, StoreError};
pub use document_user_collection::{DocumentUserCollection, USER_SCHEMA};

/// Name of the connection feature modules register their schemas into.
pub const MAIN_CONNECTION: &str = "main";
