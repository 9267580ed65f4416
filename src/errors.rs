use crate::models::SubmissionResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub const METHOD_NOT_ALLOWED: &str = "Invalid request method. Please use POST.";
pub const RATE_LIMITED: &str = "Please wait a minute before submitting another inquiry.";
pub const SPAM_FLAGGED: &str = "Your message has been flagged. Please contact us directly.";
const INTERNAL: &str = "Sorry, something went wrong. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", METHOD_NOT_ALLOWED)]
    MethodNotAllowed,

    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("{}", RATE_LIMITED)]
    RateLimited,

    #[error("{}", SPAM_FLAGGED)]
    Spam,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Spam => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Internal details stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => INTERNAL.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = SubmissionResponse::rejected(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}
