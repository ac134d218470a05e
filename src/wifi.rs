use embassy_executor::Spawner;
use embassy_net::{Runner, Stack, StackResources};
use embassy_time::{with_timeout, Duration};

use esp_hal::rng::Rng;
use esp_wifi::{
    wifi::{ClientConfiguration, Configuration, WifiController, WifiDevice},
    EspWifiController,
};

use core::str::FromStr;
use heapless::String;
use log::info;
use static_cell::StaticCell;

use stm_dp_node::bringup::Network;

use crate::constants::{DEVICE_ID, DHCP_TIMEOUT_SECS, WIFI_CONNECT_TIMEOUT_SECS};

static RESOURCES: StaticCell<StackResources<5>> = StaticCell::new();

pub struct Wifi {
    pub stack: Stack<'static>,
    controller: WifiController<'static>,
}

#[derive(Debug)]
pub enum Error {
    WifiInitFailed,
    HostnameTooLong,
    TaskSpawnFailed,
    #[allow(dead_code)]
    ConfigurationRejected(esp_wifi::wifi::WifiError),
    #[allow(dead_code)]
    StartFailed(esp_wifi::wifi::WifiError),
    #[allow(dead_code)]
    ConnectFailed(esp_wifi::wifi::WifiError),
    ConnectTimeout,
    DhcpTimeout,
}

impl Wifi {
    pub fn new(
        init: &'static EspWifiController<'static>,
        wifi: esp_hal::peripherals::WIFI<'static>,
        mut rng: Rng,
        spawner: Spawner,
    ) -> Result<Self, Error> {
        let (controller, interfaces) =
            esp_wifi::wifi::new(init, wifi).map_err(|_| Error::WifiInitFailed)?;

        let mut dhcp_config = embassy_net::DhcpConfig::default();
        dhcp_config.hostname =
            Some(String::<32>::from_str(DEVICE_ID).map_err(|_| Error::HostnameTooLong)?);

        let seed = (rng.random() as u64) << 32 | rng.random() as u64;
        let config = embassy_net::Config::dhcpv4(dhcp_config);

        let resources = RESOURCES.init(StackResources::new());
        let (stack, runner) = embassy_net::new(interfaces.sta, config, resources, seed);

        spawner
            .spawn(net_task(runner))
            .map_err(|_| Error::TaskSpawnFailed)?;

        Ok(Self { stack, controller })
    }
}

impl Network for Wifi {
    type Error = Error;

    /// Single attempt: associate, then wait for a DHCP lease.
    async fn join(
        &mut self,
        network_name: &'static str,
        network_passphrase: &'static str,
    ) -> Result<(), Error> {
        let client_config = Configuration::Client(ClientConfiguration {
            ssid: network_name.into(),
            password: network_passphrase.into(),
            ..Default::default()
        });
        self.controller
            .set_configuration(&client_config)
            .map_err(Error::ConfigurationRejected)?;

        info!("Starting wifi");
        self.controller
            .start_async()
            .await
            .map_err(Error::StartFailed)?;

        info!("About to connect to {:?}...", network_name);
        match with_timeout(
            Duration::from_secs(WIFI_CONNECT_TIMEOUT_SECS),
            self.controller.connect_async(),
        )
        .await
        {
            Ok(Ok(())) => info!("Wifi connected!"),
            Ok(Err(e)) => return Err(Error::ConnectFailed(e)),
            Err(_) => return Err(Error::ConnectTimeout),
        }

        info!("Waiting to get IP address...");
        with_timeout(
            Duration::from_secs(DHCP_TIMEOUT_SECS),
            self.stack.wait_config_up(),
        )
        .await
        .map_err(|_| Error::DhcpTimeout)?;

        if let Some(config) = self.stack.config_v4() {
            info!("Got IP: {}", config.address);
        }

        Ok(())
    }
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
