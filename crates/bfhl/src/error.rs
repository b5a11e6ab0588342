use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bfhl_core::envelope::{EnvelopeError, FailureEnvelope};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid input shape: {0}")]
    InvalidInputShape(String),

    #[error("Internal fault: {0}")]
    InternalFault(String),
}

impl From<EnvelopeError> for Error {
    fn from(err: EnvelopeError) -> Self {
        Error::InvalidInputShape(err.to_string())
    }
}

/// Failure envelopes never carry the fault detail, it only reaches the log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidInputShape(detail) => {
                log::info!("rejected request: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(FailureEnvelope::invalid_input()),
                )
                    .into_response()
            }
            Error::InternalFault(detail) => {
                log::error!("internal fault while handling request: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FailureEnvelope::internal()),
                )
                    .into_response()
            }
        }
    }
}
