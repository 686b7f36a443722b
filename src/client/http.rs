//! Reqwest-based outbound HTTP clients bound to a source address.
//!
//! Polling workers get one client per configured source address so that
//! per-IP rate limits can be spread across several egress addresses.

use crate::config::{parse_source_address, Config};
use crate::BotfleetError;
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use reqwest::tls::Version;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// TCP keep-alive interval for outbound connections.
pub const KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Idle connections kept per host. Sized for one polling worker.
pub const MAX_IDLE_PER_HOST: usize = 10;

/// Minimum TLS protocol version accepted from servers.
pub const MIN_TLS_VERSION: Version = Version::TLS_1_2;

/// An HTTP client together with the local address it is bound to.
#[derive(Debug, Clone)]
pub struct SourceClient {
    /// The underlying client. Redirects are returned, not followed.
    pub client: Client,

    /// Local address every connection originates from; `None` lets the OS choose.
    pub addr: Option<IpAddr>,

    cookies: Option<Arc<Jar>>,
}

impl SourceClient {
    /// This client's private cookie jar, if cookies are enabled.
    pub fn cookies(&self) -> Option<&Arc<Jar>> {
        self.cookies.as_ref()
    }
}

/// Build a client with the given timeout, bound to `address`.
///
/// `address` is an IP literal or empty for "any". The timeout covers the
/// whole request as well as connecting (which includes the TLS handshake).
/// When `cookies` is set the client gets its own in-memory cookie jar.
///
/// No network I/O happens here.
///
/// # Errors
/// * `InvalidSourceAddress` - `address` is neither empty nor an IP literal
/// * `ClientBuild` - the TLS backend could not be initialised
pub fn http_client_with_timeout_and_address(
    timeout_seconds: u64,
    address: &str,
    cookies: bool,
) -> Result<SourceClient, BotfleetError> {
    let addr = parse_source_address(address)?;
    let timeout = Duration::from_secs(timeout_seconds);

    let mut builder = Client::builder()
        .redirect(Policy::none())
        .local_address(addr)
        .min_tls_version(MIN_TLS_VERSION)
        .timeout(timeout)
        .connect_timeout(timeout)
        .tcp_keepalive(KEEP_ALIVE)
        .pool_max_idle_per_host(MAX_IDLE_PER_HOST);

    let jar = cookies.then(|| Arc::new(Jar::default()));
    if let Some(jar) = &jar {
        builder = builder.cookie_provider(Arc::clone(jar));
    }

    let client = builder
        .build()
        .map_err(|e| BotfleetError::ClientBuild(format!("Failed to create client: {}", e)))?;

    debug!(
        source = %addr.map_or_else(|| "any".to_string(), |a| a.to_string()),
        timeout_seconds,
        cookies,
        "built HTTP client"
    );

    Ok(SourceClient {
        client,
        addr,
        cookies: jar,
    })
}

/// Build one client per configured source address, in file order.
pub fn build_client_pool(config: &Config) -> Result<Vec<SourceClient>, BotfleetError> {
    config
        .source_ip_addresses
        .iter()
        .map(|address| {
            http_client_with_timeout_and_address(
                config.timeout_seconds,
                address,
                config.enable_cookies,
            )
        })
        .collect()
}
