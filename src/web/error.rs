use crate::domain::flow::FlowError;
use crate::domain::profile::IntakeError;
use crate::domain::wearable::WearableError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Wearable(#[from] WearableError),
    #[error("no plan has been generated for this session yet")]
    ResultsUnavailable,
    #[error("session not found")]
    SessionNotFound,
    #[error("too many requests, please try again later")]
    RateLimited,
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

/// JSON request body whose rejections come back as `ApiError` bodies.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Intake(_) | ApiError::Wearable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResultsUnavailable => StatusCode::CONFLICT,
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::InvalidBody(rejection) => rejection.status(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Intake(_) => "invalid_intake",
            ApiError::Wearable(_) => "invalid_wearable",
            ApiError::ResultsUnavailable => "results_unavailable",
            ApiError::SessionNotFound => "session_not_found",
            ApiError::RateLimited => "rate_limited",
            ApiError::InvalidBody(_) => "invalid_body",
        }
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Intake(e) => ApiError::Intake(e),
            FlowError::Wearable(e) => ApiError::Wearable(e),
            FlowError::ResultsUnavailable => ApiError::ResultsUnavailable,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            tracing::warn!("Rejected coaching input: {}", self);
        }
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
