//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] is built once at startup and served read-only: Swagger UI under
//! `/docs/`, the raw document at `/docs-json`. The `openapi-dump` binary
//! prints the same document for external tooling.

use utoipa::OpenApi;

use crate::domain::{ErrorCode, User, UserDraft};
use crate::inbound::http::ApiError;

/// Path prefix serving the Swagger UI.
pub const DOCS_PATH: &str = "/docs";
/// Path serving the raw OpenAPI JSON document.
pub const DOCS_JSON_PATH: &str = "/docs-json";

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leaves Tracker",
        description = "Api Docs for leaves tracker",
        version = "1.0"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(User, UserDraft, ApiError, ErrorCode)),
    tags(
        (name = "users", description = "Operations related to users")
    )
)]
pub struct ApiDoc;
