//! Users API handlers.
//!
//! ```text
//! POST   /user {"name":"Ada","email":"ada@example.com"}
//! GET    /user
//! GET    /user/{name}
//! DELETE /user/{id}
//! ```

use actix_web::{HttpResponse, delete, error::JsonPayloadError, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, User, UserId, UserIdError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Message for `DELETE /user` without an identifier.
pub const MISSING_ID_MESSAGE: &str = "Missing ID in the URL";
/// Message for an identifier that is not 24 hex characters.
pub const INVALID_ID_MESSAGE: &str = "Invalid ID format";
/// Message for a lookup with an empty name.
pub const MISSING_USERNAME_MESSAGE: &str = "missing username";

const INVALID_BODY_CONTEXT: &str = "invalid request body";

/// Request body for `POST /user`.
///
/// Unknown fields, including `id`, are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name, stored verbatim.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact address, stored verbatim.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        Self::new(value.name, value.email)
    }
}

/// User representation returned by every read and by create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// Store-assigned identifier as 24 lowercase hex characters.
    #[schema(example = "65f1c0de00000000000000ab")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
        }
    }
}

/// JSON extractor settings for user payloads.
///
/// Decode failures surface as `500` with an `invalid request body: ` prefix,
/// and the `Content-Type` header is not enforced.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err: JsonPayloadError, _req| {
            Error::with_context(INVALID_BODY_CONTEXT, err).into()
        })
}

/// Register the user routes and their extractor settings.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::inbound::http::users;
///
/// let _app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(create_user)
        .service(list_users)
        .service(find_user_by_name)
        .service(delete_user_without_id)
        .service(delete_user);
}

/// Create a user; the store assigns its identifier.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 500, description = "Invalid body or store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List every stored user.
#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/user")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch the first user whose name matches exactly.
#[utoipa::path(
    get,
    path = "/user/{name}",
    params(("name" = String, Path, description = "Exact user name")),
    responses(
        (status = 200, description = "Matching user", body = UserResponse),
        (status = 400, description = "Empty name", body = ErrorBody),
        (status = 404, description = "No user with that name", body = ErrorBody),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "findUserByName"
)]
#[get("/user/{name:.*}")]
pub async fn find_user_by_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let name = path.into_inner();
    if name.is_empty() {
        return Err(Error::invalid_request(MISSING_USERNAME_MESSAGE));
    }
    let user = state.users.find_by_name(&name).await?;
    Ok(web::Json(user.into()))
}

/// Delete a user by identifier.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = String, Path, description = "24-character hex identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Missing or malformed identifier", body = ErrorBody),
        (status = 404, description = "No user with that identifier", body = ErrorBody),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id:.*}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_command.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `DELETE /user` never carries an identifier.
#[delete("/user")]
pub async fn delete_user_without_id() -> ApiResult<HttpResponse> {
    Err(Error::invalid_request(MISSING_ID_MESSAGE))
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|err| match err {
        UserIdError::Empty => Error::invalid_request(MISSING_ID_MESSAGE),
        UserIdError::InvalidFormat => Error::invalid_request(INVALID_ID_MESSAGE),
    })
}

#[cfg(test)]
mod tests;
