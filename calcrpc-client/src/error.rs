//! Client-side error types.

use calcrpc_core::{Code, Status};

/// Errors returned by [`CalculatorClient`](crate::CalculatorClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error body.
    #[error("{0}")]
    Status(Status),

    /// The server has no operation under the requested name.
    #[error("operation {operation:?} not found")]
    NotFound { operation: String },

    /// The base URL or operation name does not form a valid URI.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection or HTTP-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request message could not be encoded.
    #[error(transparent)]
    Encode(#[from] calcrpc_core::EncodeError),

    /// The reply body could not be decoded.
    #[error(transparent)]
    Decode(#[from] calcrpc_core::DecodeError),
}

impl ClientError {
    /// Status code of this error.
    ///
    /// For non-Status variants, returns an appropriate code:
    /// - NotFound: `NotFound`
    /// - InvalidUrl: `InvalidArgument`
    /// - Transport/Encode/Decode: `Internal`
    pub fn code(&self) -> Code {
        match self {
            ClientError::Status(status) => status.code(),
            ClientError::NotFound { .. } => Code::NotFound,
            ClientError::InvalidUrl { .. } => Code::InvalidArgument,
            ClientError::Transport(_) | ClientError::Encode(_) | ClientError::Decode(_) => {
                Code::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code() {
        assert_eq!(
            ClientError::Status(Status::out_of_range("overflow")).code(),
            Code::OutOfRange
        );
        assert_eq!(
            ClientError::NotFound {
                operation: "divide".into()
            }
            .code(),
            Code::NotFound
        );
        assert_eq!(ClientError::Transport("refused".into()).code(), Code::Internal);
    }

    #[test]
    fn test_display() {
        let err = ClientError::Status(Status::invalid_argument("bad body"));
        assert_eq!(err.to_string(), "invalid_argument: bad body");

        let err = ClientError::NotFound {
            operation: "divide".into(),
        };
        assert_eq!(err.to_string(), r#"operation "divide" not found"#);
    }
}
