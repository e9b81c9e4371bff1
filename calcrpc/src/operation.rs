//! Operation table.
//!
//! An operation couples a request message type, a handler and a reply
//! message type. The [`OperationTable`] maps operation names to type-erased
//! [`BoxedOperation`]s so the dispatcher can run any of them from raw bytes:
//!
//! ```text
//! name -> BoxedOperation { decode Request, invoke, encode Reply }
//! ```
//!
//! # Example
//!
//! ```rust
//! use calcrpc::prelude::*;
//!
//! let table = OperationTable::calculator().register(
//!     "negate",
//!     operation_fn(|req: BinaryOperationRequest| {
//!         Ok::<_, ArithmeticError>(BinaryOperationReply::new(-req.operand_a))
//!     }),
//! );
//! assert!(table.lookup("negate").is_some());
//! ```

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use bytes::Bytes;
use calcrpc_core::{BinaryOperationRequest, ContentFormat, WireMessage};

use crate::calculator::{ArithmeticError, Calculator};
use crate::error::DispatchError;

/// A typed operation.
pub trait Operation: Send + Sync + 'static {
    /// Message decoded from the request body.
    type Request: WireMessage;
    /// Message encoded into the response body.
    type Reply: WireMessage;

    fn invoke(&self, request: Self::Request) -> Result<Self::Reply, ArithmeticError>;
}

/// An [`Operation`] built from a closure. See [`operation_fn`].
pub struct FnOperation<F, Req, Rep> {
    f: F,
    _marker: PhantomData<fn(Req) -> Rep>,
}

/// Wrap a closure as an [`Operation`].
pub fn operation_fn<F, Req, Rep>(f: F) -> FnOperation<F, Req, Rep>
where
    F: Fn(Req) -> Result<Rep, ArithmeticError> + Send + Sync + 'static,
    Req: WireMessage,
    Rep: WireMessage,
{
    FnOperation {
        f,
        _marker: PhantomData,
    }
}

impl<F, Req, Rep> Operation for FnOperation<F, Req, Rep>
where
    F: Fn(Req) -> Result<Rep, ArithmeticError> + Send + Sync + 'static,
    Req: WireMessage,
    Rep: WireMessage,
{
    type Request = Req;
    type Reply = Rep;

    fn invoke(&self, request: Req) -> Result<Rep, ArithmeticError> {
        (self.f)(request)
    }
}

/// Byte-level view of an operation, used for type erasure.
trait ErasedOperation: Send + Sync {
    fn call(&self, body: &[u8], format: ContentFormat) -> Result<Bytes, DispatchError>;
}

impl<O: Operation> ErasedOperation for O {
    fn call(&self, body: &[u8], format: ContentFormat) -> Result<Bytes, DispatchError> {
        let request: O::Request = format
            .decode(body)
            .map_err(DispatchError::MalformedPayload)?;
        let reply = self.invoke(request)?;
        format.encode(&reply).map_err(DispatchError::Encode)
    }
}

/// A type-erased operation.
#[derive(Clone)]
pub struct BoxedOperation(Arc<dyn ErasedOperation>);

impl BoxedOperation {
    pub fn new<O: Operation>(operation: O) -> Self {
        BoxedOperation(Arc::new(operation))
    }

    /// Decode `body`, invoke the operation and encode its reply.
    ///
    /// The operation is not invoked when decoding fails.
    pub fn call(&self, body: &[u8], format: ContentFormat) -> Result<Bytes, DispatchError> {
        self.0.call(body, format)
    }
}

impl std::fmt::Debug for BoxedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BoxedOperation").finish_non_exhaustive()
    }
}

/// Fixed mapping of operation names to operations.
#[derive(Clone, Debug, Default)]
pub struct OperationTable {
    operations: BTreeMap<String, BoxedOperation>,
}

impl OperationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calculator table: `add` and `subtract`.
    pub fn calculator() -> Self {
        let calculator = Calculator::new();
        Self::new()
            .register(
                "add",
                operation_fn(move |req: BinaryOperationRequest| calculator.add(req)),
            )
            .register(
                "subtract",
                operation_fn(move |req: BinaryOperationRequest| calculator.subtract(req)),
            )
    }

    /// Register an operation under `name`.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register<O: Operation>(mut self, name: impl Into<String>, operation: O) -> Self {
        self.operations
            .insert(name.into(), BoxedOperation::new(operation));
        self
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&BoxedOperation> {
        self.operations.get(name)
    }

    /// Registered operation names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcrpc_core::BinaryOperationReply;
    use prost::Message;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_calculator_table_names() {
        let table = OperationTable::calculator();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["add", "subtract"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = OperationTable::calculator();
        assert!(table.lookup("add").is_some());
        assert!(table.lookup("ADD").is_none());
        assert!(table.lookup("add ").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_call_decodes_invokes_encodes() {
        let table = OperationTable::calculator();
        let body = BinaryOperationRequest::new(2, 3).encode_to_vec();
        let reply = table
            .lookup("add")
            .unwrap()
            .call(&body, ContentFormat::Proto)
            .unwrap();
        assert_eq!(
            BinaryOperationReply::decode(reply).unwrap(),
            BinaryOperationReply::new(5)
        );
    }

    #[test]
    fn test_malformed_payload_skips_invoke() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let table = OperationTable::new().register(
            "count",
            operation_fn(move |req: BinaryOperationRequest| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(BinaryOperationReply::new(req.operand_a))
            }),
        );
        let op = table.lookup("count").unwrap();

        let err = op.call(&[0x08], ContentFormat::Proto).unwrap_err();
        assert!(matches!(err, DispatchError::MalformedPayload(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        op.call(&[], ContentFormat::Proto).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_register_replaces_existing() {
        let table = OperationTable::calculator().register(
            "add",
            operation_fn(|_: BinaryOperationRequest| Ok(BinaryOperationReply::new(42))),
        );
        assert_eq!(table.len(), 2);

        let body = BinaryOperationRequest::new(1, 1).encode_to_vec();
        let reply = table
            .lookup("add")
            .unwrap()
            .call(&body, ContentFormat::Proto)
            .unwrap();
        assert_eq!(BinaryOperationReply::decode(reply).unwrap().result, 42);
    }

    #[test]
    fn test_arithmetic_error_propagates() {
        let table = OperationTable::calculator();
        let body = BinaryOperationRequest::new(i64::MAX, 1).encode_to_vec();
        let err = table
            .lookup("add")
            .unwrap()
            .call(&body, ContentFormat::Proto)
            .unwrap_err();
        assert!(matches!(err, DispatchError::Arithmetic(_)));
    }
}
