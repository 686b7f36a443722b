//! Reading the configuration document from disk.
//!
//! Decoding is strict: any key that is not part of the schema is an error,
//! so a misspelled field never silently falls back to zero.

use crate::config::validate::check_config;
use crate::config::Config;
use crate::BotfleetError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Read, decode and validate the configuration at `path`.
///
/// # Errors
/// * `ConfigIo` - the file is missing or unreadable
/// * `Decode` - malformed JSON or an unknown key
/// * any validation error from [`check_config`]
pub fn read_config(path: impl AsRef<Path>) -> Result<Config, BotfleetError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading config");

    let file = File::open(path).map_err(|source| BotfleetError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(BufReader::new(file))
}

/// Decode and validate a configuration document from any reader.
pub fn parse_config<R: Read>(reader: R) -> Result<Config, BotfleetError> {
    let mut config: Config = serde_json::from_reader(reader)?;
    check_config(&mut config)?;
    log_summary(&config);
    Ok(config)
}

/// Like [`read_config`], but prints the error and exits the process on failure.
///
/// There is no partial-startup mode: a process that cannot load its
/// configuration must not run.
pub fn read_config_or_exit(path: impl AsRef<Path>) -> Config {
    let path = path.as_ref();
    match read_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn log_summary(config: &Config) {
    for (name, endpoint) in &config.endpoints {
        if !endpoint.serves_tls() {
            warn!(endpoint = %name, "no certificate configured, expecting a TLS-terminating proxy");
        }
    }
    if config.debug {
        warn!("debug mode is enabled");
    }
    info!(
        website = %config.website,
        endpoints = config.endpoints.len(),
        source_addresses = config.source_ip_addresses.len(),
        payments = config.coin_payments.is_some(),
        "config loaded"
    );
}
