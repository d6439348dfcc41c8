//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the user and health endpoints plus their request,
//! response and error schemas. Swagger UI serves it at `/docs` in debug
//! builds.

use utoipa::OpenApi;

use crate::inbound::http::ErrorBody;
use crate::inbound::http::users::{CreateUserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Create, list, look up and delete users stored in a document database."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::find_user_by_name,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CreateUserRequest, UserResponse, ErrorBody)),
    tags(
        (name = "users", description = "Operations on the user directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
