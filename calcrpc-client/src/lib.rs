//! HTTP client for calcrpc servers.
//!
//! This crate talks to servers built with `calcrpc`: each call is a single
//! `POST /{operation}` carrying one encoded request message, answered by one
//! encoded reply or an error.
//!
//! ## Features
//!
//! - Typed `add` / `subtract` helpers
//! - Generic [`CalculatorClient::call`] for any registered operation
//! - Both protobuf (default) and JSON encoding
//!
//! ## Example
//!
//! ```ignore
//! use calcrpc_client::CalculatorClient;
//!
//! let client = CalculatorClient::new("http://localhost:3000")?;
//! assert_eq!(client.add(2, 3).await?, 5);
//! ```
//!
//! Server errors surface as [`ClientError::Status`]; an unknown operation
//! surfaces as [`ClientError::NotFound`].

mod client;
mod error;

pub use client::CalculatorClient;
pub use error::ClientError;

// Re-export the shared types so callers need only this crate
pub use calcrpc_core::{BinaryOperationReply, BinaryOperationRequest, Code, ContentFormat, Status};
