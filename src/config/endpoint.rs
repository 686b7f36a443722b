//! Per-tenant endpoint definition.
//!
//! Every endpoint runs its own bot (token, translation, webhook) against the
//! shared data store and global polling parameters.

use crate::BotfleetError;
use serde::Deserialize;
use std::fmt;

/// One bot endpoint as written in the `endpoints` map.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoint {
    /// Path excluding the domain the webhook listens on.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub listen_path: String,

    /// Local address the webhook server binds to.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub listen_address: String,

    /// Public domain the webhook is registered under.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub webhook_domain: String,

    /// Certificate used for the webhook and the HTTP server.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub certificate_path: String,

    /// Certificate key. Empty when TLS is terminated by a proxy.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub certificate_key_path: String,

    /// Bot API token.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub bot_token: String,

    /// Name of the translation set used for user-facing strings.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub translation: String,
}

impl Endpoint {
    /// Whether this endpoint serves TLS itself rather than sitting behind a proxy.
    pub fn serves_tls(&self) -> bool {
        !self.certificate_path.is_empty() && !self.certificate_key_path.is_empty()
    }

    /// Check the required fields of the endpoint named `name`.
    pub(crate) fn check(&self, name: &str) -> Result<(), BotfleetError> {
        let required = [
            ("listen_address", &self.listen_address),
            ("listen_path", &self.listen_path),
            ("bot_token", &self.bot_token),
            ("translation", &self.translation),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(BotfleetError::EndpointField {
                    endpoint: name.to_string(),
                    field,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("listen_path", &"<redacted>")
            .field("listen_address", &self.listen_address)
            .field("webhook_domain", &self.webhook_domain)
            .field("certificate_path", &self.certificate_path)
            .field("certificate_key_path", &self.certificate_key_path)
            .field("bot_token", &"<redacted>")
            .field("translation", &self.translation)
            .finish()
    }
}
