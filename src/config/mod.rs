//! Process-wide bot fleet configuration.
//!
//! A [`Config`] is decoded from a single JSON document, validated once at
//! startup and never mutated afterwards. Share it by reference (or behind an
//! `Arc`) with every component that needs it.

pub mod endpoint;
pub mod fraction;
pub mod loader;
pub mod payments;
pub mod validate;

pub use endpoint::Endpoint;
pub use payments::CoinPaymentsConfig;

use crate::BotfleetError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Runtime configuration of the bot fleet.
///
/// Numeric fields use zero for "not configured"; validation rejects them.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Target website identifier (e.g. "chaturbate", "stripchat").
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,

    /// Period of querying statuses, in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub period_seconds: u64,

    /// Maximum models per user.
    #[serde(deserialize_with = "null_as_default")]
    pub max_models: u32,

    /// HTTP timeout, in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub timeout_seconds: u64,

    /// Operator's user ID.
    #[serde(deserialize_with = "null_as_default")]
    pub admin_id: i64,

    /// Endpoint the operator talks to. Must be a key of `endpoints`.
    #[serde(deserialize_with = "null_as_default")]
    pub admin_endpoint: String,

    /// Path to the database.
    #[serde(deserialize_with = "null_as_default")]
    pub db_path: String,

    /// Remove a model after it was reported as not found this many times.
    #[serde(deserialize_with = "null_as_default")]
    pub not_found_threshold: u32,

    /// Stop messaging a user after being blocked this many times.
    #[serde(deserialize_with = "null_as_default")]
    pub block_threshold: u32,

    /// Debug mode.
    #[serde(deserialize_with = "null_as_default")]
    pub debug: bool,

    /// Interval between queries per source address, in milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub interval_ms: u64,

    /// Source IP addresses to spread queries across. The empty string lets
    /// the OS choose.
    #[serde(deserialize_with = "null_as_default")]
    pub source_ip_addresses: Vec<String>,

    /// Error rate that warns the operator, as `"<errors>/<queries>"`.
    #[serde(deserialize_with = "null_as_default")]
    pub dangerous_error_rate: String,

    /// Keep a private cookie jar per outbound client.
    #[serde(deserialize_with = "null_as_default")]
    pub enable_cookies: bool,

    /// Headers sent with every outbound request, in order.
    #[serde(deserialize_with = "null_as_default")]
    pub headers: Vec<[String; 2]>,

    /// Password protecting the statistics page.
    #[serde(deserialize_with = "null_as_default")]
    pub stat_password: String,

    /// Period of error reports, in minutes.
    #[serde(deserialize_with = "null_as_default")]
    pub error_reporting_period_minutes: u64,

    /// Endpoints by name.
    #[serde(deserialize_with = "null_as_default")]
    pub endpoints: BTreeMap<String, Endpoint>,

    /// Optional CoinPayments integration.
    pub coin_payments: Option<CoinPaymentsConfig>,

    /// Maximum remainder of model slots for a user to count as heavy.
    #[serde(deserialize_with = "null_as_default")]
    pub heavy_user_remainder: u32,

    /// Hostname for email.
    #[serde(deserialize_with = "null_as_default")]
    pub mail_host: String,

    /// Address to listen on for incoming mail.
    #[serde(deserialize_with = "null_as_default")]
    pub mail_listen_address: String,

    #[serde(skip)]
    error_threshold: u64,

    #[serde(skip)]
    error_denominator: u64,
}

impl Config {
    /// Number of errors within [`error_denominator`](Self::error_denominator)
    /// queries that triggers an operator warning.
    pub fn error_threshold(&self) -> u64 {
        self.error_threshold
    }

    /// Size of the observation window for the dangerous error rate.
    pub fn error_denominator(&self) -> u64 {
        self.error_denominator
    }

    /// The endpoint named by `admin_endpoint`.
    pub fn admin_endpoint(&self) -> Option<&Endpoint> {
        self.endpoints.get(&self.admin_endpoint)
    }

    /// HTTP timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Polling period as a [`Duration`].
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_seconds)
    }

    /// Per-address query interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Parsed source addresses; `None` stands for the OS default.
    pub fn source_addresses(&self) -> Result<Vec<Option<IpAddr>>, BotfleetError> {
        self.source_ip_addresses
            .iter()
            .map(|s| parse_source_address(s))
            .collect()
    }

    /// Outbound headers as a [`HeaderMap`], preserving file order.
    ///
    /// Repeated names are kept as multiple values.
    pub fn header_map(&self) -> Result<HeaderMap, BotfleetError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (index, [name, value]) in self.headers.iter().enumerate() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                BotfleetError::InvalidHeader {
                    index,
                    reason: format!("name {:?}: {}", name, e),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| BotfleetError::InvalidHeader {
                index,
                reason: format!("value for {}: {}", name, e),
            })?;
            map.append(name, value);
        }
        Ok(map)
    }
}

/// Decode a JSON `null` as the field's zero value, like an omitted key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a source address; the empty string means "any".
pub fn parse_source_address(value: &str) -> Result<Option<IpAddr>, BotfleetError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| BotfleetError::InvalidSourceAddress {
            value: value.to_string(),
        })
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("website", &self.website)
            .field("period_seconds", &self.period_seconds)
            .field("max_models", &self.max_models)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("admin_id", &self.admin_id)
            .field("admin_endpoint", &self.admin_endpoint)
            .field("db_path", &self.db_path)
            .field("not_found_threshold", &self.not_found_threshold)
            .field("block_threshold", &self.block_threshold)
            .field("debug", &self.debug)
            .field("interval_ms", &self.interval_ms)
            .field("source_ip_addresses", &self.source_ip_addresses)
            .field("dangerous_error_rate", &self.dangerous_error_rate)
            .field("enable_cookies", &self.enable_cookies)
            .field("headers_count", &self.headers.len())
            .field("stat_password", &"<redacted>")
            .field(
                "error_reporting_period_minutes",
                &self.error_reporting_period_minutes,
            )
            .field("endpoints", &self.endpoints)
            .field("coin_payments", &self.coin_payments)
            .field("heavy_user_remainder", &self.heavy_user_remainder)
            .field("mail_host", &self.mail_host)
            .field("mail_listen_address", &self.mail_listen_address)
            .field("error_threshold", &self.error_threshold)
            .field("error_denominator", &self.error_denominator)
            .finish()
    }
}
