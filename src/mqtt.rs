use embassy_net::{tcp::TcpSocket, Stack};
use rust_mqtt::{
    client::{
        client::MqttClient,
        client_config::{ClientConfig, MqttVersion},
    },
    packet::v5::{publish_packet::QualityOfService, reason_codes::ReasonCode},
    utils::rng_generator::CountingRng,
};

use stm_dp_node::bringup::Broker;

use crate::constants::*;
use crate::transport;

#[derive(Debug)]
pub enum Error {
    AlreadyConnected,
    NotConnected,
    #[allow(dead_code)]
    Transport(transport::Error),
    #[allow(dead_code)]
    ConnectionFailed(ReasonCode),
    #[allow(dead_code)]
    PublishMessageFailed(ReasonCode),
    #[allow(dead_code)]
    PingFailed(ReasonCode),
}

/// Socket and client buffers, borrowed for the lifetime of the session.
pub struct Buffers {
    pub rx: [u8; RX_BUFFER_SIZE],
    pub tx: [u8; TX_BUFFER_SIZE],
    pub mqtt_rx: [u8; MQTT_RX_BUFFER_SIZE],
    pub mqtt_tx: [u8; MQTT_TX_BUFFER_SIZE],
}

impl Buffers {
    pub const fn new() -> Self {
        Self {
            rx: [0; RX_BUFFER_SIZE],
            tx: [0; TX_BUFFER_SIZE],
            mqtt_rx: [0; MQTT_RX_BUFFER_SIZE],
            mqtt_tx: [0; MQTT_TX_BUFFER_SIZE],
        }
    }
}

type Client = MqttClient<'static, TcpSocket<'static>, MQTT_MAX_PROPERTIES, CountingRng>;

pub struct Mqtt {
    stack: Stack<'static>,
    buffers: Option<&'static mut Buffers>,
    client: Option<Client>,
}

impl Mqtt {
    pub fn new(stack: Stack<'static>, buffers: &'static mut Buffers) -> Self {
        Self {
            stack,
            buffers: Some(buffers),
            client: None,
        }
    }

    pub async fn ping(&mut self) -> Result<(), Error> {
        let client = self.client.as_mut().ok_or(Error::NotConnected)?;
        client.send_ping().await.map_err(Error::PingFailed)
    }
}

impl Broker for Mqtt {
    type Error = Error;

    async fn connect(&mut self, host: &'static str, port: u16) -> Result<(), Error> {
        let Buffers {
            rx,
            tx,
            mqtt_rx,
            mqtt_tx,
        } = self.buffers.take().ok_or(Error::AlreadyConnected)?;

        let socket = transport::connect(self.stack, rx, tx, host, port)
            .await
            .map_err(Error::Transport)?;

        let mut config = ClientConfig::new(MqttVersion::MQTTv5, CountingRng(20000));
        config.add_max_subscribe_qos(QualityOfService::QoS1);
        config.add_client_id(DEVICE_ID);
        config.keep_alive = MQTT_KEEP_ALIVE_SECS;
        config.max_packet_size = MQTT_RX_BUFFER_SIZE as u32;

        let mut client = MqttClient::new(
            socket,
            mqtt_tx,
            MQTT_TX_BUFFER_SIZE,
            mqtt_rx,
            MQTT_RX_BUFFER_SIZE,
            config,
        );

        match client.connect_to_broker().await {
            Ok(()) => {
                log::info!("MQTT connected to broker successfully");
            }
            Err(e) => {
                log::error!("MQTT connect_to_broker failed: {:?}", e);
                return Err(Error::ConnectionFailed(e));
            }
        }

        self.client = Some(client);
        Ok(())
    }

    async fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Error> {
        let client = self.client.as_mut().ok_or(Error::NotConnected)?;

        match client
            .send_message(topic, payload, QualityOfService::QoS1, false)
            .await
        {
            Ok(()) => {
                log::debug!("Message published and acknowledged");
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to publish message: {:?}", e);
                Err(Error::PublishMessageFailed(e))
            }
        }
    }
}
