//! Calculator server
//!
//! Serves the `add` and `subtract` operations over HTTP.
//!
//! Run with: cargo run --bin calculator-server
//! Configure with: CALCRPC_ADDR, PORT, CALCRPC_MAX_MESSAGE_BYTES, RUST_LOG
//!
//! Test with:
//!   curl -X POST http://localhost:3000/add \
//!     -H 'Content-Type: application/json' \
//!     -d '{"operandA": 2, "operandB": 3}'

use calcrpc::{Dispatcher, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    calcrpc_examples::init_tracing();

    let config = ServerConfig::from_env()?;
    calcrpc::serve(Dispatcher::calculator(), config).await?;
    Ok(())
}
