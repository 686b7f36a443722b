//! # Botfleet
//!
//! **Startup configuration and outbound HTTP clients for a bot fleet that
//! watches remote status endpoints and relays changes to subscribers.**
//!
//! Botfleet turns an untrusted JSON document into a validated, immutable
//! [`Config`] and hands out HTTP clients bound to the configured source
//! addresses. It does not poll, schedule or deliver anything itself.
//!
//! ## Features
//!
//! - **Strict decoding** — unknown keys are rejected, so typos never fall back to zero
//! - **Fail-fast validation** — the first violation is reported, naming the key to fix
//! - **Multi-tenant endpoints** — one bot per endpoint, sharing the global parameters
//! - **Optional payments** — CoinPayments subscription packets validated when present
//! - **Source-bound clients** — one client per egress address, no redirects, TLS 1.2+
//!
//! ## Quickstart
//!
//! ```no_run
//! use botfleet::{build_client_pool, read_config};
//!
//! fn main() -> Result<(), botfleet::BotfleetError> {
//!     let config = read_config("config.json")?;
//!     let clients = build_client_pool(&config)?;
//!
//!     println!(
//!         "warn after {}/{} errors, {} client(s)",
//!         config.error_threshold(),
//!         config.error_denominator(),
//!         clients.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! - `endpoints` — bots by name; `admin_endpoint` must be one of them
//! - `dangerous_error_rate` — `"<errors>/<queries>"` that warns the operator
//! - `source_ip_addresses` — egress addresses; omitted means "let the OS choose"
//! - `coin_payments.subscription_packet` — `"<models>/<price>"`
//!
//! See [`Config`] for the full schema.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod config;
pub mod errors;

// Client layer
pub mod client;

// Re-exports for public API
pub use client::http::{build_client_pool, http_client_with_timeout_and_address, SourceClient};
pub use config::fraction::parse_fraction;
pub use config::loader::{parse_config, read_config, read_config_or_exit};
pub use config::validate::check_config;
pub use config::{CoinPaymentsConfig, Config, Endpoint};
pub use errors::BotfleetError;
