use crate::{lifecycle::PostError, store::StoreError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

/// Every failure a handler can surface. The body is always
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    InvalidCredentials,
    UserAlreadyExists,
    Unauthorized,
    Forbidden,
    NotFound,
    PayloadTooLarge,
    ValidationError(String),
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UserAlreadyExists => StatusCode::CONFLICT,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing text. Internal details stay in the log.
    fn message(&self) -> &str {
        match self {
            ApiError::InvalidCredentials => "Invalid credentials",
            ApiError::UserAlreadyExists => "User already exists",
            ApiError::Unauthorized => "Unauthorized",
            ApiError::Forbidden => "Forbidden",
            ApiError::NotFound => "Not Found",
            ApiError::PayloadTooLarge => "Request body too large",
            ApiError::ValidationError(msg) => msg,
            ApiError::InternalError(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::InternalError(msg) = &self {
            error!("Internal error: {}", msg);
        }

        (
            self.status(),
            Json(serde_json::json!({
              "error": self.message()
            })),
        )
            .into_response()
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(id) => {
                debug!("Post {} not found", id);
                ApiError::NotFound
            }
            PostError::Forbidden { .. } => ApiError::Forbidden,
            PostError::Store(err) => err.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
