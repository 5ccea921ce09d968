use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failure of the outbound call to the VK API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transport failure: {0}")]
    Transport(reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("VK API error {code}: {message}")]
    Platform { code: i64, message: String },
}

/// Everything `/onMessage` can fail with, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("message_new event without a message payload")]
    MissingPayload,

    #[error("message_new payload could not be decoded: {0}")]
    InvalidPayload(serde_json::Error),

    #[error("failed to send reply: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ResponseError for CallbackError {
    fn status_code(&self) -> StatusCode {
        match self {
            CallbackError::MalformedEvent(_) => StatusCode::BAD_REQUEST,
            CallbackError::MissingPayload | CallbackError::InvalidPayload(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CallbackError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
