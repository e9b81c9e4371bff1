use bytes::Bytes;
use calcrpc_core::{
    BinaryOperationReply, BinaryOperationRequest, Code, ContentFormat, Status, WireMessage,
};
use http::{Method, Request, Response, StatusCode, Uri, header};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;

use crate::error::ClientError;

type HyperClient = Client<HttpConnector, Full<Bytes>>;

/// Client for a calcrpc server.
///
/// Requests are sent as `POST {base_url}/{operation}` over HTTP/1.1.
/// Protobuf is the default wire format; [`use_json`](Self::use_json)
/// switches to JSON.
#[derive(Clone)]
pub struct CalculatorClient {
    client: HyperClient,
    base_url: String,
    format: ContentFormat,
}

impl std::fmt::Debug for CalculatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorClient")
            .field("base_url", &self.base_url)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl CalculatorClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let uri: Uri = base_url.parse().map_err(|e: http::uri::InvalidUri| {
            ClientError::InvalidUrl {
                url: base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if uri.scheme() != Some(&http::uri::Scheme::HTTP) || uri.authority().is_none() {
            return Err(ClientError::InvalidUrl {
                url: base_url,
                reason: "expected an http:// url with a host".to_string(),
            });
        }

        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            client,
            base_url,
            format: ContentFormat::Proto,
        })
    }

    /// Send JSON instead of protobuf.
    pub fn use_json(mut self) -> Self {
        self.format = ContentFormat::Json;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `operand_a + operand_b` on the server.
    pub async fn add(&self, operand_a: i64, operand_b: i64) -> Result<i64, ClientError> {
        let reply: BinaryOperationReply = self
            .call("add", &BinaryOperationRequest::new(operand_a, operand_b))
            .await?;
        Ok(reply.result)
    }

    /// `operand_a - operand_b` on the server.
    pub async fn subtract(&self, operand_a: i64, operand_b: i64) -> Result<i64, ClientError> {
        let reply: BinaryOperationReply = self
            .call("subtract", &BinaryOperationRequest::new(operand_a, operand_b))
            .await?;
        Ok(reply.result)
    }

    /// Call `operation` with an arbitrary request message.
    pub async fn call<Req, Rep>(&self, operation: &str, request: &Req) -> Result<Rep, ClientError>
    where
        Req: WireMessage,
        Rep: WireMessage,
    {
        let url = format!("{}/{}", self.base_url, operation);
        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| {
            ClientError::InvalidUrl {
                url: url.clone(),
                reason: e.to_string(),
            }
        })?;

        let body = self.format.encode(request)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, self.format.content_type())
            .body(Full::new(body))
            .map_err(|e| ClientError::Transport(format!("failed to build request: {e}")))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(operation, url = %url, "sending request");

        let response: Response<Incoming> = self
            .client
            .request(request)
            .await
            .map_err(|e| ClientError::Transport(format!("request failed: {e}")))?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to read response body: {e}")))?
            .to_bytes();

        #[cfg(feature = "tracing")]
        tracing::debug!(operation, status = %status, bytes = body.len(), "received response");

        match status {
            StatusCode::OK => Ok(self.format.decode(&body)?),
            StatusCode::NOT_FOUND if body.is_empty() => Err(ClientError::NotFound {
                operation: operation.to_string(),
            }),
            status => Err(ClientError::Status(parse_error_body(status, &body))),
        }
    }
}

/// Parse a JSON error body, falling back to the HTTP status when the body
/// is not one.
fn parse_error_body(status: StatusCode, body: &[u8]) -> Status {
    serde_json::from_slice(body).unwrap_or_else(|_| {
        let code = match status {
            StatusCode::BAD_REQUEST => Code::InvalidArgument,
            StatusCode::TOO_MANY_REQUESTS => Code::ResourceExhausted,
            StatusCode::INTERNAL_SERVER_ERROR => Code::Internal,
            _ => Code::Unknown,
        };
        Status::new(code, format!("unexpected HTTP status {status}"))
    })
}
