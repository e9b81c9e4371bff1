//! Request size limit layer.
//!
//! [`MessageLimitLayer`] rejects requests to a registered operation whose
//! `Content-Length` exceeds the configured [`MessageLimits`] before the body
//! is read. Requests to unknown paths pass through untouched so they still
//! answer `404`. Bodies without a `Content-Length` (chunked uploads) pass
//! through and are bounded while being read by the dispatch handler.

use axum::body::Body;
use axum::http::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::response::{IntoResponse, Response};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service, ServiceExt};

use crate::dispatcher::Dispatcher;
use crate::limits::MessageLimits;

/// Layer that enforces [`MessageLimits`] on the declared request size.
///
/// # Example
///
/// ```rust,ignore
/// use calcrpc::{Dispatcher, MessageLimitLayer, MessageLimits};
///
/// let dispatcher = Dispatcher::calculator();
/// let app = Router::new()
///     .fallback(handler)
///     .layer(MessageLimitLayer::new(dispatcher, MessageLimits::new(64 * 1024)));
/// ```
#[derive(Debug, Clone)]
pub struct MessageLimitLayer {
    dispatcher: Dispatcher,
    limits: MessageLimits,
}

impl MessageLimitLayer {
    /// Enforce `limits` on requests that `dispatcher` would route to an
    /// operation.
    pub fn new(dispatcher: Dispatcher, limits: MessageLimits) -> Self {
        Self { dispatcher, limits }
    }
}

impl<S> Layer<S> for MessageLimitLayer {
    type Service = MessageLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MessageLimitService {
            inner,
            dispatcher: self.dispatcher.clone(),
            limits: self.limits,
        }
    }
}

/// Service produced by [`MessageLimitLayer`].
#[derive(Debug, Clone)]
pub struct MessageLimitService<S> {
    inner: S,
    dispatcher: Dispatcher,
    limits: MessageLimits,
}

impl<S> Service<Request<Body>> for MessageLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Error: Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if let Some(content_length) = get_content_length(&req)
            && let Err(err) = self.limits.check_size(content_length)
            && self.dispatcher.resolve(req.uri().path()).is_some()
        {
            tracing::debug!(
                content_length,
                path = req.uri().path(),
                "request rejected by message limit"
            );
            return Box::pin(async move { Ok(err.into_response()) });
        }

        // Keep the service that was polled ready for this call
        let inner = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, inner);

        Box::pin(async move { inner.oneshot(req).await })
    }
}

/// Get Content-Length header value as usize.
fn get_content_length<B>(req: &Request<B>) -> Option<usize> {
    req.headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}
