//! Load a bot fleet configuration and build its outbound clients.
//!
//! # Running
//!
//! ```bash
//! cargo run --example load_config -- config.json
//! ```
//!
//! The process exits with status 1 if the configuration is invalid, printing
//! the key that needs fixing.

use botfleet::{build_client_pool, read_config_or_exit, BotfleetError};

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    // Fatal on any error: there is no partial-startup mode
    let config = read_config_or_exit(&path);

    println!("Website: {}", config.website);
    println!("Endpoints:");
    for (name, endpoint) in &config.endpoints {
        let marker = if *name == config.admin_endpoint { " (admin)" } else { "" };
        println!(
            "  {}{}: {} [{}]",
            name,
            marker,
            endpoint.webhook_domain,
            if endpoint.serves_tls() { "tls" } else { "proxy" }
        );
    }
    println!(
        "Dangerous error rate: {} of {}",
        config.error_threshold(),
        config.error_denominator()
    );
    if let Some(payments) = &config.coin_payments {
        println!(
            "Subscription: {} models for {} ({})",
            payments.packet_model_count(),
            payments.packet_price(),
            payments.currencies.join(", ")
        );
    }

    match build_client_pool(&config) {
        Ok(clients) => {
            for client in &clients {
                match client.addr {
                    Some(addr) => println!("Client bound to {}", addr),
                    None => println!("Client bound to OS default address"),
                }
            }
        }
        Err(e) => {
            match &e {
                BotfleetError::InvalidSourceAddress { value } => {
                    eprintln!("Bad source address: {}", value);
                }
                _ => eprintln!("Client error: {}", e),
            }
            std::process::exit(1);
        }
    }
}
