//! Botfleet error types.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading configuration or building clients.
#[derive(Debug, Error)]
pub enum BotfleetError {
    /// The configuration file is missing or unreadable.
    #[error("Config I/O error: {}: {source}", .path.display())]
    ConfigIo {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or contains an unknown key.
    #[error("Config decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A required field is zero or empty.
    #[error("configure {field}")]
    Missing {
        /// The configuration key to fix.
        field: &'static str,
    },

    /// An endpoint entry is missing a required field.
    #[error("configure {field} for endpoint {endpoint:?}")]
    EndpointField {
        /// Name of the offending endpoint.
        endpoint: String,
        /// The configuration key to fix.
        field: &'static str,
    },

    /// No endpoints are configured at all.
    #[error("configure endpoints")]
    NoEndpoints,

    /// `admin_endpoint` does not name a configured endpoint.
    #[error("configure admin_endpoint: no endpoint named {name:?}")]
    AdminEndpointNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A source address is neither empty nor an IP literal.
    #[error("cannot parse source IP address {value:?}")]
    InvalidSourceAddress {
        /// The rejected string.
        value: String,
    },

    /// A header pair cannot be sent over HTTP.
    #[error("configure headers: entry {index} is invalid: {reason}")]
    InvalidHeader {
        /// Zero-based position in `headers`.
        index: usize,
        /// What the HTTP layer objected to.
        reason: String,
    },

    /// A fraction field does not look like `"x/y"`.
    #[error("configure {field} as \"x/y\", got {value:?}")]
    MalformedFraction {
        /// The configuration key to fix.
        field: &'static str,
        /// The rejected string.
        value: String,
    },

    /// A fraction component does not fit the integer type.
    #[error("configure {field}: cannot parse {value:?}: {source}")]
    FractionNumber {
        /// The configuration key to fix.
        field: &'static str,
        /// The rejected component.
        value: String,
        /// Underlying integer parse error.
        #[source]
        source: ParseIntError,
    },

    /// The denominator of a fraction is zero.
    #[error("configure {field} as \"x/y\", where y > 0")]
    ZeroDenominator {
        /// The configuration key to fix.
        field: &'static str,
    },

    /// The subscription packet has a zero model count or price.
    #[error("invalid subscription packet {value:?}: both parts must be positive")]
    InvalidSubscriptionPacket {
        /// The rejected string.
        value: String,
    },

    /// The HTTP stack refused to construct a client.
    #[error("HTTP client error: {0}")]
    ClientBuild(String),
}

impl BotfleetError {
    /// The configuration key an operator has to fix, when the error names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Missing { field }
            | Self::EndpointField { field, .. }
            | Self::MalformedFraction { field, .. }
            | Self::FractionNumber { field, .. }
            | Self::ZeroDenominator { field } => Some(*field),
            Self::NoEndpoints => Some("endpoints"),
            Self::AdminEndpointNotFound { .. } => Some("admin_endpoint"),
            Self::InvalidSourceAddress { .. } => Some("source_ip_addresses"),
            Self::InvalidHeader { .. } => Some("headers"),
            Self::InvalidSubscriptionPacket { .. } => Some("subscription_packet"),
            Self::ConfigIo { .. } | Self::Decode(_) | Self::ClientBuild(_) => None,
        }
    }
}
