//! HTTP surface.
//!
//! Every request, whatever its method or path, reaches a single fallback
//! handler. Paths that name no operation answer `404` without the body being
//! read; everything else has its body read under the message limit and
//! handed to the [`Dispatcher`].
//!
//! The operation name comes from the URI path alone. A query string is
//! ignored, so `/add?verbose=1` runs `add`.

use axum::{
    Router,
    extract::{Request, State},
    http::header,
    response::{IntoResponse, Response},
};
use calcrpc_core::ContentFormat;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::dispatcher::{Dispatched, Dispatcher};
use crate::error::DispatchError;
use crate::layer::MessageLimitLayer;
use crate::limits::MessageLimits;

#[derive(Clone)]
struct RouterState {
    dispatcher: Dispatcher,
    limits: MessageLimits,
}

/// Build the axum router serving `dispatcher`.
///
/// Operations are selected by the request path only; the query string is
/// not part of the operation name.
///
/// # Example
///
/// ```rust,no_run
/// use calcrpc::{Dispatcher, ServerConfig};
///
/// # async fn run() -> std::io::Result<()> {
/// let app = calcrpc::router(Dispatcher::calculator(), &ServerConfig::new());
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
/// axum::serve(listener, app).await
/// # }
/// ```
pub fn router(dispatcher: Dispatcher, config: &ServerConfig) -> Router {
    let limit_layer = MessageLimitLayer::new(dispatcher.clone(), config.limits());
    let state = RouterState {
        dispatcher,
        limits: config.limits(),
    };
    Router::new()
        .fallback(dispatch)
        .with_state(state)
        .layer(limit_layer)
        .layer(TraceLayer::new_for_http())
}

/// Bind `config.addr()` and serve `dispatcher` until the listener fails.
pub async fn serve(dispatcher: Dispatcher, config: ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    let operations: Vec<&str> = dispatcher.operations().names().collect();
    tracing::info!(
        addr = %listener.local_addr()?,
        operations = ?operations,
        "calcrpc server listening"
    );
    let app = router(dispatcher, &config);
    axum::serve(listener, app).await
}

async fn dispatch(State(state): State<RouterState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    if state.dispatcher.resolve(parts.uri.path()).is_none() {
        tracing::debug!(path = parts.uri.path(), "unknown operation");
        return Dispatched::NotFound.into_response();
    }

    let format = ContentFormat::from_content_type(
        parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
    );

    let max_size = state.limits.max_message_size().unwrap_or(usize::MAX);
    let body = match axum::body::to_bytes(body, max_size).await {
        Ok(body) => body,
        Err(e) => {
            return DispatchError::PayloadTooLarge(format!("failed to read request body: {e}"))
                .into_response();
        }
    };

    state
        .dispatcher
        .dispatch(parts.uri.path(), &body, format)
        .into_response()
}
