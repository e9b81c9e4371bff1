//! Wire codecs.
//!
//! This module provides the [`MessageCodec`] trait and its two
//! implementations:
//! - [`ProtoCodec`]: protobuf binary encoding, the default wire format
//! - [`JsonCodec`]: JSON rendering of the same messages
//!
//! [`ContentFormat`] selects between them from a `Content-Type` header.

use bytes::{Bytes, BytesMut};
use prost::Message;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{DecodeError, EncodeError};

/// Content type of protobuf-encoded bodies.
pub const APPLICATION_PROTO: &str = "application/proto";
/// Content type of JSON-encoded bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// A message that can travel in either wire format.
pub trait WireMessage: Message + Serialize + DeserializeOwned + Default + 'static {}

impl<T> WireMessage for T where T: Message + Serialize + DeserializeOwned + Default + 'static {}

/// Converts between messages and their wire bytes.
///
/// # Example
///
/// ```
/// use calcrpc_core::{BinaryOperationRequest, MessageCodec, ProtoCodec};
///
/// let bytes = ProtoCodec.encode(&BinaryOperationRequest::new(2, 3)).unwrap();
/// let decoded: BinaryOperationRequest = ProtoCodec.decode(&bytes).unwrap();
/// assert_eq!(decoded.operand_a, 2);
/// ```
pub trait MessageCodec: Send + Sync + 'static {
    /// The `Content-Type` header value for bodies produced by this codec.
    fn content_type(&self) -> &'static str;

    /// Decode a message from a request or response body.
    fn decode<M: WireMessage>(&self, body: &[u8]) -> Result<M, DecodeError>;

    /// Encode a message into a body.
    fn encode<M: WireMessage>(&self, message: &M) -> Result<Bytes, EncodeError>;
}

/// Protobuf binary codec backed by `prost`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoCodec;

impl MessageCodec for ProtoCodec {
    fn content_type(&self) -> &'static str {
        APPLICATION_PROTO
    }

    fn decode<M: WireMessage>(&self, body: &[u8]) -> Result<M, DecodeError> {
        Ok(M::decode(body)?)
    }

    fn encode<M: WireMessage>(&self, message: &M) -> Result<Bytes, EncodeError> {
        let mut buf = BytesMut::with_capacity(message.encoded_len());
        message.encode(&mut buf)?;
        Ok(buf.freeze())
    }
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl MessageCodec for JsonCodec {
    fn content_type(&self) -> &'static str {
        APPLICATION_JSON
    }

    fn decode<M: WireMessage>(&self, body: &[u8]) -> Result<M, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    fn encode<M: WireMessage>(&self, message: &M) -> Result<Bytes, EncodeError> {
        Ok(Bytes::from(serde_json::to_vec(message)?))
    }
}

/// Wire format of a request, chosen from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFormat {
    #[default]
    Proto,
    Json,
}

impl ContentFormat {
    /// Pick the format for a `Content-Type` header value.
    ///
    /// Only `application/json` (parameters allowed) selects JSON. Every other
    /// value, including a missing header, is treated as protobuf.
    pub fn from_content_type(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Proto;
        };
        let media_type = value.split(';').next().unwrap_or("").trim();
        if media_type.eq_ignore_ascii_case(APPLICATION_JSON) {
            Self::Json
        } else {
            Self::Proto
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Proto => ProtoCodec.content_type(),
            Self::Json => JsonCodec.content_type(),
        }
    }

    pub fn decode<M: WireMessage>(&self, body: &[u8]) -> Result<M, DecodeError> {
        match self {
            Self::Proto => ProtoCodec.decode(body),
            Self::Json => JsonCodec.decode(body),
        }
    }

    pub fn encode<M: WireMessage>(&self, message: &M) -> Result<Bytes, EncodeError> {
        match self {
            Self::Proto => ProtoCodec.encode(message),
            Self::Json => JsonCodec.encode(message),
        }
    }
}
