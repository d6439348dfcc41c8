//! HTTP adapter mapping for domain errors.
//!
//! Client errors render as a JSON [`ErrorBody`]; internal errors render as
//! plain text carrying their `"<context>: <detail>"` message. Both carry the
//! `trace-id` header when one was captured.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Structured body for 4xx responses.
///
/// # Examples
/// ```
/// use user_directory::domain::Error;
/// use user_directory::inbound::http::ErrorBody;
///
/// let body = ErrorBody::from(&Error::not_found("User Not Found"));
/// assert_eq!(body.error, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// `0` for invalid requests, `1` for missing users.
    #[schema(example = 1)]
    pub error: i32,
    /// Human-readable explanation.
    #[schema(example = "User Not Found")]
    pub message: String,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        Self {
            error: err.code().wire_code(),
            message: err.message().to_owned(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.trace_id().unwrap_or_default();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if status.is_server_error() {
            error!(trace_id, status = status.as_u16(), message = %self, "request failed");
            builder
                .content_type(ContentType::plaintext())
                .body(self.message().to_owned())
        } else {
            debug!(trace_id, status = status.as_u16(), message = %self, "request rejected");
            builder.json(ErrorBody::from(self))
        }
    }
}

#[cfg(test)]
mod tests;
