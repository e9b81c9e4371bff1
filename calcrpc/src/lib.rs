//! # calcrpc
//!
//! A path-routed RPC dispatcher that speaks binary (protobuf) messages over
//! plain HTTP, built on [Axum](https://github.com/tokio-rs/axum).
//!
//! Every request goes through one linear pipeline:
//!
//! ```text
//! path + body -> normalize path -> look up operation -> decode -> invoke -> encode -> response
//! ```
//!
//! The operation name is the request path with percent-escapes decoded and
//! leading `/` removed, so `POST /add` runs the `add` operation. Unknown
//! operations answer `404 Not Found` with an empty body. Decode, encode and
//! arithmetic failures answer with a JSON error body and a 4xx/5xx status.
//!
//! ## Getting Started
//!
//! ```rust,no_run
//! use calcrpc::{Dispatcher, ServerConfig};
//!
//! # async fn run() -> std::io::Result<()> {
//! let config = ServerConfig::new();
//! calcrpc::serve(Dispatcher::calculator(), config).await
//! # }
//! ```
//!
//! New operations are added by registering them in an [`OperationTable`];
//! the dispatcher itself never changes.

pub mod calculator;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod layer;
pub mod limits;
pub mod operation;
pub mod path;
pub mod router;

pub use calculator::{ArithmeticError, Calculator};
pub use config::{ConfigError, ServerConfig};
pub use dispatcher::{Dispatched, Dispatcher};
pub use error::DispatchError;
pub use layer::{MessageLimitLayer, MessageLimitService};
pub use limits::MessageLimits;
pub use operation::{BoxedOperation, FnOperation, Operation, OperationTable, operation_fn};
pub use path::normalize_path;
pub use router::{router, serve};

// Re-export the shared types
pub use calcrpc_core as core;
pub use prost;

pub mod prelude {
    //! A prelude for `calcrpc` providing the most common types.
    pub use crate::calculator::{ArithmeticError, Calculator};
    pub use crate::dispatcher::{Dispatched, Dispatcher};
    pub use crate::error::DispatchError;
    pub use crate::operation::{Operation, OperationTable, operation_fn};
    pub use calcrpc_core::{BinaryOperationReply, BinaryOperationRequest, Code, ContentFormat};
}
