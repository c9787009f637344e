//! Mapping of domain errors and rejected payloads onto the error envelope.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use revassign_review::ReviewError;
use revassign_server_models::{ErrorCode, ErrorResponse};

/// A failed service call, rendered as `{"error": {"code", "message"}}`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] ReviewError);

impl ApiError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.0.code()
    }
}

#[must_use]
pub const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::TeamExists
        | ErrorCode::UserExists
        | ErrorCode::PrExists
        | ErrorCode::PrMerged
        | ErrorCode::NotAssigned
        | ErrorCode::NoCandidate => StatusCode::CONFLICT,
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self.code() {
            ErrorCode::Internal => "Internal storage error".to_string(),
            _ => self.0.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.code(), message))
    }
}

fn invalid_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let message = err.to_string();
    log::debug!("Rejected request: {message}");
    let response =
        HttpResponse::BadRequest().json(ErrorResponse::new(ErrorCode::InvalidRequest, message));
    InternalError::from_response(err, response).into()
}

#[allow(clippy::needless_pass_by_value)]
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid_request(err)
}

#[allow(clippy::needless_pass_by_value)]
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid_request(err)
}

#[allow(clippy::unused_async)]
pub async fn unknown_route(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        ErrorCode::NotFound,
        format!("No route for {} {}", req.method(), req.path()),
    ))
}

/// Fallback for a known path called with a method it does not serve.
#[allow(clippy::unused_async)]
pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new(
        ErrorCode::MethodNotAllowed,
        format!("{} does not accept {}", req.path(), req.method()),
    ))
}
