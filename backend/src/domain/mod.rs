//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / UserId / DisplayName / UserDraft: user identity and input.
//! - UsersService: CRUD over the user collection port.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{DomainError, ErrorCode};
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, User, UserDraft, UserId, UserValidationError};
pub use self::users_service::{UsersService, map_user_validation_error};

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
