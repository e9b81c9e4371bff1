//! Calculator client
//!
//! Calls `add` and `subtract` on a running calculator server, then shows
//! how an unknown operation and an overflow are reported.
//!
//! Run with: cargo run --bin calculator-client
//! Server URL: CALCRPC_URL (default http://127.0.0.1:3000)

use calcrpc_client::{BinaryOperationReply, BinaryOperationRequest, CalculatorClient, ClientError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    calcrpc_examples::init_tracing();

    let url = calcrpc_examples::server_url();
    let client = CalculatorClient::new(url.as_str())?;

    let sum = client.add(2, 3).await?;
    tracing::info!(sum, "add(2, 3)");

    let difference = client.subtract(10, 4).await?;
    tracing::info!(difference, "subtract(10, 4)");

    let json_sum = client.clone().use_json().add(-7, 7).await?;
    tracing::info!(json_sum, "add(-7, 7) over JSON");

    let divide: Result<BinaryOperationReply, ClientError> = client
        .call("divide", &BinaryOperationRequest::new(8, 2))
        .await;
    match divide {
        Err(ClientError::NotFound { operation }) => {
            tracing::info!(operation, "operation not available, as expected")
        }
        other => anyhow::bail!("expected NotFound for divide, got {other:?}"),
    }

    match client.add(i64::MAX, 1).await {
        Err(err) => tracing::info!(code = %err.code(), error = %err, "overflow rejected"),
        Ok(value) => anyhow::bail!("expected overflow error, got {value}"),
    }

    Ok(())
}
