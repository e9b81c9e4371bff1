//! Status codes and error types.
//!
//! This module provides the error vocabulary shared by server and client:
//! - [`Code`]: Status codes carried in error bodies
//! - [`Status`]: The JSON error body (`{"code": ..., "message": ...}`)
//! - [`DecodeError`] / [`EncodeError`]: Wire codec failures

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status codes, a subset of the Connect/gRPC code space.
///
/// The discriminants match the canonical gRPC numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    Unknown = 2,
    InvalidArgument = 3,
    NotFound = 5,
    ResourceExhausted = 8,
    OutOfRange = 11,
    Internal = 13,
}

impl Code {
    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::Unknown => "unknown",
            Code::InvalidArgument => "invalid_argument",
            Code::NotFound => "not_found",
            Code::ResourceExhausted => "resource_exhausted",
            Code::OutOfRange => "out_of_range",
            Code::Internal => "internal",
        }
    }

    /// HTTP status code used when this code is returned from a unary call.
    pub fn http_status(&self) -> u16 {
        match self {
            Code::Unknown => 500,
            Code::InvalidArgument => 400,
            Code::NotFound => 404,
            Code::ResourceExhausted => 429,
            Code::OutOfRange => 400,
            Code::Internal => 500,
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Code`] from a string fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code")]
pub struct ParseCodeError(());

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Code::Unknown),
            "invalid_argument" => Ok(Code::InvalidArgument),
            "not_found" => Ok(Code::NotFound),
            "resource_exhausted" => Ok(Code::ResourceExhausted),
            "out_of_range" => Ok(Code::OutOfRange),
            "internal" => Ok(Code::Internal),
            _ => Err(ParseCodeError(())),
        }
    }
}

/// Error status rendered as the JSON body of a failed call.
///
/// # Example
///
/// ```
/// use calcrpc_core::{Code, Status};
///
/// let status = Status::out_of_range("integer overflow");
/// assert_eq!(status.code().as_str(), "out_of_range");
/// assert_eq!(status.message(), Some("integer overflow"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    code: Code,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Status {
    /// Create a new status with a code and message.
    pub fn new<S: Into<String>>(code: Code, message: S) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Create a new status with just a code.
    pub fn from_code(code: Code) -> Self {
        Self {
            code,
            message: None,
        }
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn out_of_range<S: Into<String>>(message: S) -> Self {
        Self::new(Code::OutOfRange, message)
    }

    pub fn resource_exhausted<S: Into<String>>(message: S) -> Self {
        Self::new(Code::ResourceExhausted, message)
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(Code::Internal, message)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code.as_str())?;
        if let Some(msg) = &self.message {
            write!(f, ": {}", msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for Status {}

/// A request body could not be turned into a message.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode protobuf message: {0}")]
    Proto(#[from] prost::DecodeError),

    #[error("failed to decode JSON message: {0}")]
    Json(#[from] serde_json::Error),
}

/// A message could not be turned into a response body.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to encode protobuf message: {0}")]
    Proto(#[from] prost::EncodeError),

    #[error("failed to encode JSON message: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_string_round_trip() {
        for code in [
            Code::Unknown,
            Code::InvalidArgument,
            Code::NotFound,
            Code::ResourceExhausted,
            Code::OutOfRange,
            Code::Internal,
        ] {
            assert_eq!(code.as_str().parse::<Code>(), Ok(code));
        }
        assert!("bogus".parse::<Code>().is_err());
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(Code::InvalidArgument.http_status(), 400);
        assert_eq!(Code::OutOfRange.http_status(), 400);
        assert_eq!(Code::ResourceExhausted.http_status(), 429);
        assert_eq!(Code::Internal.http_status(), 500);
    }

    #[test]
    fn test_serialize_status() {
        let json = serde_json::to_string(&Status::invalid_argument("bad body")).unwrap();
        assert_eq!(json, r#"{"code":"invalid_argument","message":"bad body"}"#);
    }

    #[test]
    fn test_serialize_status_without_message() {
        let json = serde_json::to_string(&Status::from_code(Code::Internal)).unwrap();
        assert_eq!(json, r#"{"code":"internal"}"#);
    }

    #[test]
    fn test_deserialize_status() {
        let status: Status =
            serde_json::from_str(r#"{"code":"out_of_range","message":"overflow"}"#).unwrap();
        assert_eq!(status, Status::out_of_range("overflow"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            Status::resource_exhausted("too big").to_string(),
            "resource_exhausted: too big"
        );
        assert_eq!(Status::from_code(Code::Internal).to_string(), "internal");
    }
}
