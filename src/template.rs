//! Example values shipped in `cfg.toml.example`.
//!
//! Shared with `build.rs`, so it must stay free of crate-internal imports.

pub const NETWORK_NAME_EXAMPLE: &str = "YOUR_WIFI_SSID";
pub const NETWORK_PASSPHRASE_EXAMPLE: &str = "YOUR_WIFI_PASSWORD";
pub const BROKER_HOST_EXAMPLE: &str = "your-broker-host-or-ip";

/// Plaintext MQTT port, used when `broker_port` is omitted.
pub const DEFAULT_BROKER_PORT: u16 = 1883;

/// `cfg.toml` key and example value of every field that has a placeholder.
pub const PLACEHOLDERS: [(&str, &str); 3] = [
    ("network_name", NETWORK_NAME_EXAMPLE),
    ("network_passphrase", NETWORK_PASSPHRASE_EXAMPLE),
    ("broker_host", BROKER_HOST_EXAMPLE),
];
