//! Wire error taxonomy and its HTTP rendering.
//!
//! Every failure leaves the server as
//! `{"message": ..., "error": <kind>, "code": <status>, "causes": [...] | null}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{Cause, InputError};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// The closed set of error kinds a client can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::BadGateway => StatusCode::BAD_GATEWAY,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub causes: Option<Vec<Cause>>,
}

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            causes: None,
        }
    }

    pub fn with_causes(mut self, causes: Vec<Cause>) -> Self {
        self.causes = Some(causes);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TooManyRequests, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadGateway, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    error: ErrorKind,
    code: u16,
    causes: Option<&'a [Cause]>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        let body = ErrorBody {
            message: &self.message,
            error: self.kind,
            code: status.as_u16(),
            causes: self.causes.as_deref(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message, causes } => {
                ApiError::unprocessable_entity(message).with_causes(causes)
            }
            DomainError::InvalidFormat { message, causes } => {
                ApiError::bad_request(message).with_causes(causes)
            }
            DomainError::NotFound(message) => ApiError::not_found(message),
            DomainError::Conflict(message) => ApiError::conflict(message),
            DomainError::Store(err) => {
                tracing::error!(error = %err, "internal server error");
                ApiError::internal("internal server error")
            }
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        DomainError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_render_snake_case_with_their_codes() {
        let cases = [
            (ErrorKind::BadRequest, "bad_request", 400),
            (ErrorKind::Unauthorized, "unauthorized", 401),
            (ErrorKind::Forbidden, "forbidden", 403),
            (ErrorKind::NotFound, "not_found", 404),
            (ErrorKind::Conflict, "conflict", 409),
            (ErrorKind::UnprocessableEntity, "unprocessable_entity", 422),
            (ErrorKind::TooManyRequests, "too_many_requests", 429),
            (ErrorKind::InternalServerError, "internal_server_error", 500),
            (ErrorKind::BadGateway, "bad_gateway", 502),
            (ErrorKind::ServiceUnavailable, "service_unavailable", 503),
        ];
        for (kind, name, code) in cases {
            assert_eq!(serde_json::to_value(kind).unwrap(), name);
            assert_eq!(kind.status().as_u16(), code);
        }
    }

    #[test]
    fn constructors_pick_their_kind() {
        assert_eq!(ApiError::unauthorized("x").kind, ErrorKind::Unauthorized);
        assert_eq!(ApiError::forbidden("x").kind, ErrorKind::Forbidden);
        assert_eq!(
            ApiError::too_many_requests("x").kind,
            ErrorKind::TooManyRequests
        );
        assert_eq!(ApiError::bad_gateway("x").kind, ErrorKind::BadGateway);
        assert_eq!(
            ApiError::service_unavailable("x").kind,
            ErrorKind::ServiceUnavailable
        );
    }

    #[test]
    fn domain_errors_map_to_kinds() {
        let err: ApiError = DomainError::invalid(vec![Cause::new("cid", "cid is required")]).into();
        assert_eq!(err.kind, ErrorKind::UnprocessableEntity);
        assert_eq!(err.message, "Invalid data");
        assert_eq!(err.causes.as_ref().map(Vec::len), Some(1));

        let err: ApiError = InputError::malformed("order_date", "invalid date format").into();
        assert_eq!(err.kind, ErrorKind::BadRequest);

        let err: ApiError = DomainError::NotFound("buyer not found".to_string()).into();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.causes, None);

        let err: ApiError = DomainError::conflict("seller with this CID already exists").into();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}
