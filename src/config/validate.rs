//! Configuration validation.
//!
//! Checks run in a fixed order and stop at the first violation, so the same
//! document always produces the same error:
//! 1. Source addresses
//! 2. Endpoints (in name order), then the admin endpoint reference
//! 3. Required global scalars
//! 4. Outbound headers
//! 5. Derived fractions (`dangerous_error_rate`, then `coin_payments`)
//!
//! Defaults are filled in only after every check has passed.

use crate::config::fraction::parse_fraction;
use crate::config::{parse_source_address, Config};
use crate::BotfleetError;

/// Validate `config` in place and fill in derived values and defaults.
///
/// On success the config is complete: every invariant holds, the error
/// rate and subscription packet are parsed, and `source_ip_addresses`
/// has at least one entry.
pub fn check_config(config: &mut Config) -> Result<(), BotfleetError> {
    for address in &config.source_ip_addresses {
        parse_source_address(address)?;
    }

    check_endpoints(config)?;
    check_required(config)?;
    config.header_map()?;

    let (threshold, denominator) =
        parse_fraction("dangerous_error_rate", &config.dangerous_error_rate)?;
    if denominator == 0 {
        return Err(BotfleetError::ZeroDenominator {
            field: "dangerous_error_rate",
        });
    }

    if let Some(payments) = config.coin_payments.as_mut() {
        payments.check()?;
    }

    config.error_threshold = threshold;
    config.error_denominator = denominator;

    if config.source_ip_addresses.is_empty() {
        config.source_ip_addresses.push(String::new());
    }

    Ok(())
}

/// Every endpoint must be complete before the admin reference is resolved.
fn check_endpoints(config: &Config) -> Result<(), BotfleetError> {
    for (name, endpoint) in &config.endpoints {
        endpoint.check(name)?;
    }
    if config.endpoints.is_empty() {
        return Err(BotfleetError::NoEndpoints);
    }
    if !config.endpoints.contains_key(&config.admin_endpoint) {
        return Err(BotfleetError::AdminEndpointNotFound {
            name: config.admin_endpoint.clone(),
        });
    }
    Ok(())
}

fn check_required(config: &Config) -> Result<(), BotfleetError> {
    let missing = |field: &'static str| -> Result<(), BotfleetError> {
        Err(BotfleetError::Missing { field })
    };

    if config.period_seconds == 0 {
        return missing("period_seconds");
    }
    if config.max_models == 0 {
        return missing("max_models");
    }
    if config.timeout_seconds == 0 {
        return missing("timeout_seconds");
    }
    if config.admin_id == 0 {
        return missing("admin_id");
    }
    if config.db_path.is_empty() {
        return missing("db_path");
    }
    if config.not_found_threshold == 0 {
        return missing("not_found_threshold");
    }
    if config.block_threshold == 0 {
        return missing("block_threshold");
    }
    if config.website.is_empty() {
        return missing("website");
    }
    if config.stat_password.is_empty() {
        return missing("stat_password");
    }
    if config.error_reporting_period_minutes == 0 {
        return missing("error_reporting_period_minutes");
    }
    if config.heavy_user_remainder == 0 {
        return missing("heavy_user_remainder");
    }
    if config.mail_host.is_empty() {
        return missing("mail_host");
    }
    if config.mail_listen_address.is_empty() {
        return missing("mail_listen_address");
    }
    Ok(())
}
