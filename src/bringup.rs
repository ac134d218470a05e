//! Start-up sequence consuming the compiled credentials.
//!
//! The credentials are read once, checked for unreplaced template values, and
//! only then handed to the network and broker collaborators. Nothing is retried
//! here; a failed step is reported to the caller as is.

#![allow(async_fn_in_trait)]

use crate::config::{Config, Field};
use crate::placeholder::{self, TextFields};

/// Joins the wireless network.
pub trait Network {
    type Error: core::fmt::Debug;

    async fn join(
        &mut self,
        network_name: &'static str,
        network_passphrase: &'static str,
    ) -> Result<(), Self::Error>;
}

/// Opens and uses a message-broker session.
pub trait Broker {
    type Error: core::fmt::Debug;

    async fn connect(&mut self, host: &'static str, port: u16) -> Result<(), Self::Error>;

    async fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error>;
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error<N, B> {
    #[error("refusing to start: {0}")]
    Config(#[from] placeholder::Error),
    #[error("network join failed: {0:?}")]
    Network(N),
    #[error("broker connection failed: {0:?}")]
    Broker(B),
}

/// Snapshot of all five values, taken before any network operation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub network_name: &'static str,
    pub network_passphrase: &'static str,
    pub broker_host: &'static str,
    pub broker_port: u16,
    pub topic: &'static str,
}

impl Credentials {
    pub fn read(config: &Config) -> Self {
        Self {
            network_name: config.network_name(),
            network_passphrase: config.network_passphrase(),
            broker_host: config.broker_host(),
            broker_port: config.broker_port(),
            topic: config.topic(),
        }
    }
}

impl TextFields for Credentials {
    fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::NetworkName => Some(self.network_name),
            Field::NetworkPassphrase => Some(self.network_passphrase),
            Field::BrokerHost => Some(self.broker_host),
            Field::BrokerPort => None,
            Field::Topic => Some(self.topic),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("network_name", &self.network_name)
            .field("broker_host", &self.broker_host)
            .field("broker_port", &self.broker_port)
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}

pub struct BringUp<N, B> {
    config: &'static Config,
    network: N,
    broker: B,
}

impl<N, B> BringUp<N, B>
where
    N: Network,
    B: Broker,
{
    pub fn new(config: &'static Config, network: N, broker: B) -> Self {
        Self {
            config,
            network,
            broker,
        }
    }

    /// Runs the sequence: check, join, connect.
    pub async fn start(self) -> Result<Session<N, B>, Error<N::Error, B::Error>> {
        let Self {
            config,
            mut network,
            mut broker,
        } = self;

        // The store is read here only; everything below uses the snapshot
        let credentials = Credentials::read(config);
        placeholder::check(&credentials)?;

        log::info!("Joining network {:?}", credentials.network_name);
        network
            .join(credentials.network_name, credentials.network_passphrase)
            .await
            .map_err(Error::Network)?;

        log::info!(
            "Connecting to broker {}:{}",
            credentials.broker_host,
            credentials.broker_port
        );
        broker
            .connect(credentials.broker_host, credentials.broker_port)
            .await
            .map_err(Error::Broker)?;

        log::info!("Bring-up complete, default topic {:?}", credentials.topic);
        Ok(Session {
            network,
            broker,
            credentials,
        })
    }
}

/// A joined network and an open broker session.
pub struct Session<N, B> {
    network: N,
    broker: B,
    credentials: Credentials,
}

impl<N, B> Session<N, B>
where
    N: Network,
    B: Broker,
{
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Default publish/subscribe destination.
    pub fn topic(&self) -> &'static str {
        self.credentials.topic
    }

    /// Publishes to the default topic.
    pub async fn publish(&mut self, payload: &[u8]) -> Result<(), B::Error> {
        self.broker.publish(self.credentials.topic, payload).await
    }

    pub fn into_parts(self) -> (N, B) {
        (self.network, self.broker)
    }
}
