//! CoinPayments subscription add-on configuration.

use crate::config::fraction::parse_fraction;
use crate::BotfleetError;
use serde::Deserialize;
use std::fmt;

/// Optional payment integration selling extra model slots.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoinPaymentsConfig {
    /// Subscription packet as `"<models>/<price>"`.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub subscription_packet: String,

    /// Currencies a subscription can be bought with.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub currencies: Vec<String>,

    /// CoinPayments public key.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub public_key: String,

    /// CoinPayments private key.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub private_key: String,

    /// URL the IPN status callback is delivered to.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub ipn_listen_url: String,

    /// Local address the IPN listener binds to.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub ipn_listen_address: String,

    /// Shared IPN secret.
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub ipn_secret: String,

    #[serde(skip)]
    packet_model_count: u64,

    #[serde(skip)]
    packet_price: u64,
}

impl CoinPaymentsConfig {
    /// Number of models one packet adds. Zero until validated.
    pub fn packet_model_count(&self) -> u64 {
        self.packet_model_count
    }

    /// Price of one packet in currency units. Zero until validated.
    pub fn packet_price(&self) -> u64 {
        self.packet_price
    }

    /// Check required fields and derive the packet from `subscription_packet`.
    ///
    /// The first component of the packet is the model count, the second is
    /// the price.
    pub(crate) fn check(&mut self) -> Result<(), BotfleetError> {
        if self.currencies.is_empty() {
            return Err(BotfleetError::Missing { field: "currencies" });
        }
        let required = [
            ("public_key", &self.public_key),
            ("private_key", &self.private_key),
            ("ipn_listen_url", &self.ipn_listen_url),
            ("ipn_listen_address", &self.ipn_listen_address),
            ("ipn_secret", &self.ipn_secret),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(BotfleetError::Missing { field });
            }
        }

        let (models, price) = parse_fraction("subscription_packet", &self.subscription_packet)?;
        if models == 0 || price == 0 {
            return Err(BotfleetError::InvalidSubscriptionPacket {
                value: self.subscription_packet.clone(),
            });
        }

        self.packet_model_count = models;
        self.packet_price = price;
        Ok(())
    }
}

impl fmt::Debug for CoinPaymentsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinPaymentsConfig")
            .field("subscription_packet", &self.subscription_packet)
            .field("currencies", &self.currencies)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("ipn_listen_url", &self.ipn_listen_url)
            .field("ipn_listen_address", &self.ipn_listen_address)
            .field("ipn_secret", &"<redacted>")
            .field("packet_model_count", &self.packet_model_count)
            .field("packet_price", &self.packet_price)
            .finish()
    }
}
