use core::fmt;
use core::num::NonZeroU16;

/// Longest network name accepted by an 802.11 join request.
pub const MAX_NETWORK_NAME_LEN: usize = 32;
/// Longest WPA2 passphrase (64 hex digits for a raw PSK).
pub const MAX_NETWORK_PASSPHRASE_LEN: usize = 64;
pub use crate::template::DEFAULT_BROKER_PORT;

/// One of the five configured values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NetworkName,
    NetworkPassphrase,
    BrokerHost,
    BrokerPort,
    Topic,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::NetworkName,
        Field::NetworkPassphrase,
        Field::BrokerHost,
        Field::BrokerPort,
        Field::Topic,
    ];

    /// Key used in `cfg.toml`.
    pub const fn key(self) -> &'static str {
        match self {
            Field::NetworkName => "network_name",
            Field::NetworkPassphrase => "network_passphrase",
            Field::BrokerHost => "broker_host",
            Field::BrokerPort => "broker_port",
            Field::Topic => "topic",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("`{0}` is not set")]
    MissingValue(Field),
    #[error("`{field}` is longer than {max} bytes")]
    TooLong { field: Field, max: usize },
}

/// Where the compiled credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The user's `cfg.toml`.
    File,
    /// `cfg.toml` was missing and the unedited template was compiled in.
    Template,
}

/// Network and broker credentials, fixed at build time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // Wi-Fi SSID to join
    network_name: &'static str,

    // Wi-Fi pre-shared key, empty for an open network
    network_passphrase: &'static str,

    // MQTT broker hostname or IP address
    broker_host: &'static str,

    // MQTT port (usually 1883 or 8883 for TLS)
    broker_port: NonZeroU16,

    // Default topic to publish to and subscribe on
    topic: &'static str,
}

impl Config {
    /// Builds a configuration, rejecting empty required values, port 0 and
    /// values the network stack cannot carry.
    ///
    /// This is a `const fn`: the generated [`CONFIG`] evaluates it at compile
    /// time, so a bad `cfg.toml` fails the build instead of the device.
    pub const fn new(
        network_name: &'static str,
        network_passphrase: &'static str,
        broker_host: &'static str,
        broker_port: u16,
        topic: &'static str,
    ) -> Result<Self, Error> {
        if network_name.is_empty() {
            return Err(Error::MissingValue(Field::NetworkName));
        }
        if network_name.len() > MAX_NETWORK_NAME_LEN {
            return Err(Error::TooLong {
                field: Field::NetworkName,
                max: MAX_NETWORK_NAME_LEN,
            });
        }
        if network_passphrase.len() > MAX_NETWORK_PASSPHRASE_LEN {
            return Err(Error::TooLong {
                field: Field::NetworkPassphrase,
                max: MAX_NETWORK_PASSPHRASE_LEN,
            });
        }
        if broker_host.is_empty() {
            return Err(Error::MissingValue(Field::BrokerHost));
        }
        let broker_port = match NonZeroU16::new(broker_port) {
            Some(port) => port,
            None => return Err(Error::MissingValue(Field::BrokerPort)),
        };
        if topic.is_empty() {
            return Err(Error::MissingValue(Field::Topic));
        }

        Ok(Self {
            network_name,
            network_passphrase,
            broker_host,
            broker_port,
            topic,
        })
    }

    pub const fn network_name(&self) -> &'static str {
        self.network_name
    }

    pub const fn network_passphrase(&self) -> &'static str {
        self.network_passphrase
    }

    pub const fn broker_host(&self) -> &'static str {
        self.broker_host
    }

    pub const fn broker_port(&self) -> u16 {
        self.broker_port.get()
    }

    pub const fn topic(&self) -> &'static str {
        self.topic
    }

    /// Raw value of a text field; the port is not text and yields `None`.
    pub const fn text(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::NetworkName => Some(self.network_name),
            Field::NetworkPassphrase => Some(self.network_passphrase),
            Field::BrokerHost => Some(self.broker_host),
            Field::BrokerPort => None,
            Field::Topic => Some(self.topic),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("network_name", &self.network_name)
            .field("network_passphrase", &"<redacted>")
            .field("broker_host", &self.broker_host)
            .field("broker_port", &self.broker_port)
            .field("topic", &self.topic)
            .finish()
    }
}

pub fn network_name() -> &'static str {
    CONFIG.network_name()
}

pub fn network_passphrase() -> &'static str {
    CONFIG.network_passphrase()
}

pub fn broker_host() -> &'static str {
    CONFIG.broker_host()
}

pub fn broker_port() -> u16 {
    CONFIG.broker_port()
}

pub fn topic() -> &'static str {
    CONFIG.topic()
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));
