//! Entry point for the Offer Engine binary.
//!
//! Running this binary starts an HTTP server exposing the evaluation
//! engine.  The bind address comes from `OFFER_BIND_ADDR` (default
//! `127.0.0.1:3000`), the log level from `RUST_LOG` or `OFFER_LOG_LEVEL`,
//! and `OFFER_ENGINE_CONFIG` may point to a JSON file overriding the
//! engine constants.  A `.env` file is honoured.

use offer_engine::config::AppConfig;
use offer_engine::{api, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init(&config.log_level)?;
    api::serve(config.bind_addr, config.engine).await
}
