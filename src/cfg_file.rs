//! Reading `cfg.toml` and generating the `CONFIG` constant.
//!
//! Compiled into `build.rs`, next to `template.rs`.

use serde::Deserialize;

use crate::template::{DEFAULT_BROKER_PORT, PLACEHOLDERS};

pub const CONFIG_FILE: &str = "cfg.toml";
pub const TEMPLATE_FILE: &str = "cfg.toml.example";

fn default_port() -> u16 {
    DEFAULT_BROKER_PORT
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub network_name: String,
    #[serde(default)]
    pub network_passphrase: String,
    pub broker_host: String,
    #[serde(default = "default_port")]
    pub broker_port: u16,
    pub topic: String,
}

impl RawConfig {
    pub fn parse(path: &str, toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("{path}: {e}"))
    }

    fn value(&self, key: &str) -> &str {
        match key {
            "network_name" => &self.network_name,
            "network_passphrase" => &self.network_passphrase,
            "broker_host" => &self.broker_host,
            "topic" => &self.topic,
            _ => "",
        }
    }

    /// Keys still holding their example value.
    pub fn placeholder_keys(&self) -> Vec<&'static str> {
        PLACEHOLDERS
            .iter()
            .filter(|(key, example)| self.value(key) == *example)
            .map(|(key, _)| *key)
            .collect()
    }
}

/// File to compile in and the matching `Source` variant.
///
/// A missing working copy is fatal for the device image; host builds fall
/// back to the unedited template.
pub fn locate(config_exists: bool, firmware: bool) -> Result<(&'static str, &'static str), String> {
    if config_exists {
        Ok((CONFIG_FILE, "File"))
    } else if firmware {
        Err(format!(
            "{CONFIG_FILE} not found: copy {TEMPLATE_FILE} to {CONFIG_FILE} and fill in your credentials"
        ))
    } else {
        Ok((TEMPLATE_FILE, "Template"))
    }
}

// (variant, key, message) for each way `Config::new` can refuse a value
const REJECTIONS: [(&str, &str, &str); 6] = [
    ("MissingValue(Field::NetworkName)", "network_name", "is empty"),
    ("MissingValue(Field::BrokerHost)", "broker_host", "is empty"),
    ("MissingValue(Field::BrokerPort)", "broker_port", "is zero"),
    ("MissingValue(Field::Topic)", "topic", "is empty"),
    ("TooLong { field: Field::NetworkName, .. }", "network_name", "is longer than 32 bytes"),
    ("TooLong { field: Field::NetworkPassphrase, .. }", "network_passphrase", "is longer than 64 bytes"),
];

/// Rust source defining `CONFIG` and `CONFIG_SOURCE`.
///
/// `Config::new` runs in const context, so invalid values fail the build
/// with a message naming the offending key.
pub fn generate(raw: &RawConfig, path: &str, source: &str) -> String {
    let mut arms = String::new();
    for (variant, key, message) in REJECTIONS {
        arms.push_str(&format!(
            "            Err(Error::{variant}) => panic!({:?}),\n",
            format!("{path}: `{key}` {message}")
        ));
    }

    format!(
        r#"
        /// Device credentials compiled from `{path}`.
        pub const CONFIG: Config = match Config::new({name:?}, {pass:?}, {host:?}, {port}, {topic:?}) {{
            Ok(config) => config,
{arms}            Err(_) => panic!("{path}: invalid configuration"),
        }};

        /// Where [`CONFIG`] was read from.
        pub const CONFIG_SOURCE: Source = Source::{source};
    "#,
        name = raw.network_name,
        pass = raw.network_passphrase,
        host = raw.broker_host,
        port = raw.broker_port,
        topic = raw.topic,
    )
}
