//! End-to-end loading of configuration documents from disk.

use botfleet::{build_client_pool, read_config, BotfleetError};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn minimal() -> Value {
    json!({
        "website": "stripchat",
        "period_seconds": 1,
        "max_models": 1,
        "timeout_seconds": 1,
        "admin_id": 1,
        "admin_endpoint": "main",
        "db_path": "bot.db",
        "not_found_threshold": 1,
        "block_threshold": 1,
        "dangerous_error_rate": "1/1000",
        "stat_password": "pw",
        "error_reporting_period_minutes": 1,
        "heavy_user_remainder": 1,
        "mail_host": "mail.example.com",
        "mail_listen_address": ":25",
        "endpoints": {
            "main": {
                "listen_path": "/hook",
                "listen_address": ":8080",
                "webhook_domain": "bot.example.com",
                "certificate_path": "",
                "certificate_key_path": "",
                "bot_token": "token",
                "translation": "en"
            }
        }
    })
}

fn coin_payments() -> Value {
    json!({
        "subscription_packet": "15/10",
        "currencies": ["BTC", "LTC"],
        "public_key": "pub",
        "private_key": "priv",
        "ipn_listen_url": "https://pay.example.com/ipn",
        "ipn_listen_address": ":9090",
        "ipn_secret": "secret"
    })
}

fn write(doc: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(doc.to_string().as_bytes()).unwrap();
    file
}

fn load(doc: &Value) -> Result<botfleet::Config, BotfleetError> {
    let file = write(doc);
    read_config(file.path())
}

#[test]
fn minimal_document_loads() {
    let config = load(&minimal()).unwrap();
    assert_eq!(config.error_threshold(), 1);
    assert_eq!(config.error_denominator(), 1000);
    assert_eq!(config.admin_endpoint().unwrap().bot_token, "token");
}

#[test]
fn omitted_source_addresses_default_to_os_choice() {
    let config = load(&minimal()).unwrap();
    assert_eq!(config.source_ip_addresses, vec![String::new()]);

    let mut doc = minimal();
    doc["source_ip_addresses"] = json!([]);
    let config = load(&doc).unwrap();
    assert_eq!(config.source_ip_addresses, vec![String::new()]);
}

#[test]
fn unknown_top_level_key_is_rejected() {
    let mut doc = minimal();
    doc["block_treshold"] = json!(3);
    let err = load(&doc).unwrap_err();
    assert!(matches!(err, BotfleetError::Decode(_)));
    assert!(err.to_string().contains("block_treshold"));
}

#[test]
fn unknown_endpoint_key_is_rejected() {
    let mut doc = minimal();
    doc["endpoints"]["main"]["token"] = json!("oops");
    assert!(matches!(load(&doc), Err(BotfleetError::Decode(_))));
}

#[test]
fn unknown_payments_key_is_rejected() {
    let mut doc = minimal();
    doc["coin_payments"] = coin_payments();
    doc["coin_payments"]["ipn_path"] = json!("/ipn");
    assert!(matches!(load(&doc), Err(BotfleetError::Decode(_))));
}

#[test]
fn admin_endpoint_must_be_configured() {
    let mut doc = minimal();
    doc["admin_endpoint"] = json!("admin");
    let err = load(&doc).unwrap_err();
    assert!(matches!(err, BotfleetError::AdminEndpointNotFound { .. }));
    assert_eq!(err.field(), Some("admin_endpoint"));
}

#[test]
fn missing_bot_token_fails_among_valid_endpoints() {
    let mut doc = minimal();
    let good = doc["endpoints"]["main"].clone();
    let mut broken = good.clone();
    broken.as_object_mut().unwrap().remove("bot_token");
    doc["endpoints"]["de"] = good.clone();
    doc["endpoints"]["fr"] = broken;
    doc["endpoints"]["ru"] = good;

    match load(&doc).unwrap_err() {
        BotfleetError::EndpointField { endpoint, field } => {
            assert_eq!(endpoint, "fr");
            assert_eq!(field, "bot_token");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn zero_error_denominator_is_rejected() {
    let mut doc = minimal();
    doc["dangerous_error_rate"] = json!("10/0");
    let err = load(&doc).unwrap_err();
    assert!(matches!(err, BotfleetError::ZeroDenominator { .. }));
}

#[test]
fn subscription_packet_is_models_then_price() {
    let mut doc = minimal();
    doc["coin_payments"] = coin_payments();
    let config = load(&doc).unwrap();

    // "15/10" reads as 15 models for 10 currency units.
    let payments = config.coin_payments.as_ref().unwrap();
    assert_eq!(payments.packet_model_count(), 15);
    assert_eq!(payments.packet_price(), 10);
    assert_eq!(payments.currencies, vec!["BTC", "LTC"]);
}

#[test]
fn negative_number_is_a_decode_error() {
    let mut doc = minimal();
    doc["max_models"] = json!(-1);
    assert!(matches!(load(&doc), Err(BotfleetError::Decode(_))));
}

#[test]
fn headers_and_options_are_loaded() {
    let mut doc = minimal();
    doc["debug"] = json!(true);
    doc["enable_cookies"] = json!(true);
    doc["interval_ms"] = json!(250);
    doc["headers"] = json!([["User-Agent", "Mozilla/5.0"], ["Accept-Language", "en"]]);
    let config = load(&doc).unwrap();

    assert!(config.debug);
    assert!(config.enable_cookies);
    assert_eq!(config.interval().as_millis(), 250);
    let headers = config.header_map().unwrap();
    assert_eq!(headers.get("user-agent").unwrap(), "Mozilla/5.0");
    assert_eq!(headers.len(), 2);
}

#[test]
fn client_pool_matches_source_addresses() {
    let mut doc = minimal();
    doc["source_ip_addresses"] = json!(["127.0.0.1", "127.0.0.2"]);
    doc["enable_cookies"] = json!(true);
    let config = load(&doc).unwrap();

    let pool = build_client_pool(&config).unwrap();
    assert_eq!(pool.len(), 2);

    let url = reqwest::Url::parse("https://status.example.com/").unwrap();
    pool[0].cookies().unwrap().add_cookie_str("visited=1", &url);
    {
        use reqwest::cookie::CookieStore;
        assert!(pool[0].cookies().unwrap().cookies(&url).is_some());
        assert!(pool[1].cookies().unwrap().cookies(&url).is_none());
    }
}

#[test]
fn null_source_addresses_default_to_os_choice() {
    let mut doc = minimal();
    doc["source_ip_addresses"] = Value::Null;
    let config = load(&doc).unwrap();
    assert_eq!(config.source_ip_addresses, vec![String::new()]);
}

#[test]
fn null_optional_fields_load() {
    let mut doc = minimal();
    doc["endpoints"]["main"]["certificate_key_path"] = Value::Null;
    doc["endpoints"]["main"]["certificate_path"] = Value::Null;
    doc["headers"] = Value::Null;
    doc["interval_ms"] = Value::Null;
    doc["debug"] = Value::Null;
    doc["enable_cookies"] = Value::Null;
    doc["coin_payments"] = Value::Null;
    let config = load(&doc).unwrap();

    assert!(!config.admin_endpoint().unwrap().serves_tls());
    assert!(config.headers.is_empty());
    assert_eq!(config.interval_ms, 0);
    assert!(!config.debug);
    assert!(!config.enable_cookies);
    assert!(config.coin_payments.is_none());
}

#[test]
fn null_required_field_names_the_key() {
    let mut doc = minimal();
    doc["db_path"] = Value::Null;
    let err = load(&doc).unwrap_err();
    assert_eq!(err.field(), Some("db_path"));
    assert_eq!(err.to_string(), "configure db_path");
}

#[test]
fn non_ascii_digits_are_a_malformed_fraction() {
    let mut doc = minimal();
    doc["dangerous_error_rate"] = json!("\u{0661}/1000");
    let err = load(&doc).unwrap_err();
    assert!(matches!(err, BotfleetError::MalformedFraction { .. }));
}
