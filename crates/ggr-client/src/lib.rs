//! Gaming Gateway Client Library
//!
//! Typed clients for two gaming-aggregator APIs: user and wallet management,
//! game catalog and launch, history, scatter calls and RTP control.
//!
//! Both clients share one transport: credentials are merged into a JSON body,
//! POSTed with fixed timeouts and gzip, and the decoded reply is returned
//! untouched. Failures come back as [`GatewayError`], never as panics.
//!
//! | client | dialect | request |
//! |--------|---------|---------|
//! | [`NexusggrClient`] | method field | `POST {endpoint}` with `"method"` in the body |
//! | [`TeloClient`] | path routed | `POST {endpoint}/{method}` |
//!
//! # Example
//!
//! ```rust,no_run
//! use ggr_client::{ClientConfig, NexusggrClient, TransactionKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NexusggrClient::new(ClientConfig::new(
//!         "agent",
//!         "secret",
//!         "https://api.nexusggr.example/",
//!     ))?;
//!
//!     client.register("player1").await?;
//!     client
//!         .transaction("player1", TransactionKind::Deposit, 500, None)
//!         .await?;
//!
//!     match client.launch_game("player1", "PRAGMATIC", "vs20doghouse", None, None).await {
//!         Ok(body) => println!("{}", body),
//!         Err(e) => eprintln!("{}", e.to_value()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Clients take an already-resolved [`ClientConfig`]. [`EnvConfig`] resolves
//! one from explicit overrides, `NEXUSGGR_*` / `TELO_*` variables and an
//! optional `.env` file.
//!
//! # Testing
//!
//! The `testing` module provides a mock vendor that records payloads:
//!
//! ```rust,ignore
//! use ggr_client::testing::MockVendor;
//!
//! let vendor = MockVendor::start().await?;
//! let client = TeloClient::new(vendor.config_with_path("A", "T", "/api/v2"))?;
//! client.info(None).await?;
//! assert_eq!(vendor.last_request().unwrap().path, "/api/v2/info");
//! ```

mod client;
mod config;
mod dates;
mod error;
pub mod nexusggr;
mod payload;
pub mod telo;
pub mod testing;
mod transport;
mod types;

pub use client::Gateway;
pub use config::{ClientConfig, ConfigOverrides, ConfigSource, EnvConfig, TELO_DEFAULT_ENDPOINT};
pub use dates::{DateRange, ResolvedRange, DATE_FORMAT};
pub use error::{
    GatewayError, GatewayResult, Result, INVALID_JSON_MESSAGE, NO_USERS_MESSAGE,
};
pub use payload::{NoParams, Payload, RESERVED_KEYS};
pub use transport::{Dialect, HttpTransport, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
pub use types::*;

// Re-export the façades for convenience
pub use nexusggr::NexusggrClient;
pub use telo::TeloClient;
