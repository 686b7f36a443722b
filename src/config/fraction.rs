//! Parsing of `"x/y"` fraction fields.
//!
//! The parser only splits the string into two integers. What the numerator
//! and denominator mean is decided by each caller.

use crate::BotfleetError;
use once_cell::sync::Lazy;
use regex::Regex;

static FRACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)/([0-9]+)$").expect("fraction pattern is a valid regex")
});

/// Parse `value` as `"<numerator>/<denominator>"`.
///
/// `field` is the configuration key the value came from and is carried in
/// any returned error. Zero components are accepted here.
///
/// # Errors
/// * `MalformedFraction` - value does not match `^([0-9]+)/([0-9]+)$`
/// * `FractionNumber` - a component overflows `u64`
pub fn parse_fraction(field: &'static str, value: &str) -> Result<(u64, u64), BotfleetError> {
    let caps = FRACTION_RE
        .captures(value)
        .ok_or_else(|| BotfleetError::MalformedFraction {
            field,
            value: value.to_string(),
        })?;

    let component = |i: usize| -> Result<u64, BotfleetError> {
        let digits = &caps[i];
        digits.parse().map_err(|source| BotfleetError::FractionNumber {
            field,
            value: digits.to_string(),
            source,
        })
    };

    Ok((component(1)?, component(2)?))
}
