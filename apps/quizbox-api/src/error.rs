use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quizbox_shared::ads::ValidationError;
use quizbox_shared::api::ApiErrorBody;
use quizbox_shared::quiz::{EvaluateError, QuizError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("missing or invalid bearer token")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("admin API is disabled: no admin token configured")]
    AdminDisabled,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<QuizError> for ApiError {
    fn from(e: QuizError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<EvaluateError> for ApiError {
    fn from(e: EvaluateError) -> Self {
        ApiError::Unprocessable(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::AdminDisabled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
