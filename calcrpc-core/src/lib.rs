//! Core types for calcrpc.
//!
//! This crate provides the types shared by the server (`calcrpc`) and the
//! client (`calcrpc-client`) crates.
//!
//! ## Modules
//!
//! - [`message`]: Request and reply messages of the calculator operations
//! - [`codec`]: Wire codecs (protobuf binary and JSON) and content negotiation
//! - [`error`]: Status codes, the JSON error body and codec errors

mod codec;
mod error;
mod message;

pub use codec::*;
pub use error::*;
pub use message::*;
