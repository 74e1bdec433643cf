//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use badgeup_core::{CommunityError, ErrorKind};

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials or signature.
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden - valid caller but not allowed to perform the action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - invalid state transition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Endpoint disabled by configuration.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            Self::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CommunityError> for ApiError {
    fn from(err: CommunityError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::Forbidden => Self::Forbidden(message),
            ErrorKind::AlreadyResolved => Self::Conflict(message),
            ErrorKind::InvalidArgument => Self::BadRequest(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badgeup_core::{AnswerId, IdError, QuestionId};

    fn status_of(err: CommunityError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn community_errors_map_to_status_codes() {
        let question_id = QuestionId::new(1).unwrap();

        assert_eq!(
            status_of(CommunityError::NotFound {
                entity: "question",
                id: "Q9".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CommunityError::AnswerNotFound {
                question_id,
                answer_id: AnswerId::new(2).unwrap()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CommunityError::Forbidden {
                reason: "not yours".into()
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(CommunityError::AlreadyResolved { question_id }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CommunityError::InvalidArgument("blank".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CommunityError::InvalidId(IdError::Empty)),
            StatusCode::BAD_REQUEST
        );
    }
}
