//! Errors raised while dispatching a request, and their HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calcrpc_core::{Code, DecodeError, EncodeError, Status};

use crate::calculator::ArithmeticError;

/// Failure of a dispatched request.
///
/// An unknown operation is not an error; it is
/// [`Dispatched::NotFound`](crate::Dispatched::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request body could not be decoded as the operation's request
    /// message. The operation was not invoked.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] DecodeError),

    /// The operation rejected its operands.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// The reply message could not be encoded.
    #[error("failed to encode reply: {0}")]
    Encode(#[source] EncodeError),

    /// The request body exceeded the configured message limit.
    #[error("{0}")]
    PayloadTooLarge(String),
}

impl DispatchError {
    /// Status code reported for this error.
    pub fn code(&self) -> Code {
        match self {
            DispatchError::MalformedPayload(_) => Code::InvalidArgument,
            DispatchError::Arithmetic(ArithmeticError::Overflow { .. }) => Code::OutOfRange,
            DispatchError::Encode(_) => Code::Internal,
            DispatchError::PayloadTooLarge(_) => Code::ResourceExhausted,
        }
    }

    /// HTTP status of the error response.
    pub fn http_status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code().http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The JSON error body for this error.
    pub fn to_status(&self) -> Status {
        Status::new(self.code(), self.to_string())
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (self.http_status_code(), Json(self.to_status())).into_response()
    }
}
