//! The request dispatcher.
//!
//! One request in, one decode, one operation call, one encode, one response
//! out. The dispatcher holds nothing but an immutable [`OperationTable`], so
//! a single instance is shared by all requests without locking.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use calcrpc_core::ContentFormat;

use crate::error::DispatchError;
use crate::operation::OperationTable;
use crate::path::normalize_path;

/// Successful outcome of [`Dispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The operation ran; `body` is the encoded reply.
    Reply {
        body: Bytes,
        content_type: &'static str,
    },
    /// No operation is registered under the requested path.
    NotFound,
}

impl IntoResponse for Dispatched {
    fn into_response(self) -> Response {
        match self {
            Dispatched::Reply { body, content_type } => {
                let mut response = Response::new(Body::from(body));
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(content_type),
                );
                response
            }
            Dispatched::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// Routes requests to operations by path.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    operations: Arc<OperationTable>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::calculator()
    }
}

impl Dispatcher {
    pub fn new(operations: OperationTable) -> Self {
        Self {
            operations: Arc::new(operations),
        }
    }

    /// Dispatcher over the `add`/`subtract` calculator table.
    pub fn calculator() -> Self {
        Self::new(OperationTable::calculator())
    }

    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    /// Operation name `path` routes to, or `None` when no operation is
    /// registered under it.
    ///
    /// Lets the HTTP surface answer unknown paths before reading the body.
    pub fn resolve(&self, path: &str) -> Option<String> {
        normalize_path(path).filter(|name| self.operations.lookup(name).is_some())
    }

    /// Dispatch one request.
    ///
    /// `path` is the raw request path; it is normalized with
    /// [`normalize_path`] and matched exactly against the operation table.
    /// An unmatched path yields [`Dispatched::NotFound`], never an error.
    pub fn dispatch(
        &self,
        path: &str,
        body: &[u8],
        format: ContentFormat,
    ) -> Result<Dispatched, DispatchError> {
        let Some(name) = normalize_path(path) else {
            tracing::debug!(path, "path is not valid UTF-8 after decoding");
            return Ok(Dispatched::NotFound);
        };
        let Some(operation) = self.operations.lookup(&name) else {
            tracing::debug!(operation = %name, "unknown operation");
            return Ok(Dispatched::NotFound);
        };

        match operation.call(body, format) {
            Ok(reply) => {
                tracing::debug!(
                    operation = %name,
                    request_bytes = body.len(),
                    reply_bytes = reply.len(),
                    "operation completed"
                );
                Ok(Dispatched::Reply {
                    body: reply,
                    content_type: format.content_type(),
                })
            }
            Err(err) => {
                match &err {
                    DispatchError::Arithmetic(_) => {
                        tracing::debug!(operation = %name, error = %err, "operation failed")
                    }
                    _ => tracing::warn!(operation = %name, error = %err, "operation failed"),
                }
                Err(err)
            }
        }
    }
}
