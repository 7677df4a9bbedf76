//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side of the users feature.
    pub users: Arc<dyn UsersQuery>,
    /// Write side of the users feature.
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle the users ports.
    #[must_use]
    pub const fn new(users: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            users_command,
        }
    }
}
