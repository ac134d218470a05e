#![no_std]
#![no_main]

use static_cell::StaticCell;

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{rng::Rng, timer::timg::TimerGroup};
use esp_println::logger::init_logger;
use esp_wifi::EspWifiController;

use stm_dp_node::bringup::BringUp;
use stm_dp_node::{Source, CONFIG, CONFIG_SOURCE};

extern crate alloc;

mod constants;
mod mqtt;
mod transport;
mod wifi;

use constants::*;
use mqtt::{Buffers, Mqtt};
use wifi::Wifi;

esp_bootloader_esp_idf::esp_app_desc!();

static WIFI_INIT: StaticCell<EspWifiController<'static>> = StaticCell::new();
static MQTT_BUFFERS: StaticCell<Buffers> = StaticCell::new();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    init_logger(log::LevelFilter::Info);
    log::info!("stm-dp-node {}", VERSION);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let timg1 = TimerGroup::new(peripherals.TIMG1);

    esp_hal_embassy::init(timg0.timer0);

    if CONFIG_SOURCE == Source::Template {
        log::warn!("Firmware was built from cfg.toml.example");
    }
    log::info!("Configuration: {:?}", CONFIG);

    let rng = Rng::new(peripherals.RNG);

    let init = match esp_wifi::init(timg1.timer0, rng.clone(), peripherals.RADIO_CLK) {
        Ok(init) => WIFI_INIT.init(init),
        Err(e) => return halt(format_args!("WiFi init error: {:?}", e)).await,
    };

    let wifi = match Wifi::new(init, peripherals.WIFI, rng.clone(), spawner) {
        Ok(wifi) => wifi,
        Err(e) => return halt(format_args!("WiFi setup error: {:?}", e)).await,
    };

    let mqtt = Mqtt::new(wifi.stack, MQTT_BUFFERS.init(Buffers::new()));

    // Nothing touches the network before the credentials pass the placeholder check
    let session = match BringUp::new(&CONFIG, wifi, mqtt).start().await {
        Ok(session) => session,
        Err(e) => return halt(format_args!("Bring-up failed: {}", e)).await,
    };

    log::info!("Ready, default topic {:?}", session.topic());
    let (_wifi, mut mqtt) = session.into_parts();

    loop {
        Timer::after(Duration::from_secs(MQTT_KEEP_ALIVE_SECS.into())).await;
        if let Err(e) = mqtt.ping().await {
            return halt(format_args!("MQTT keep-alive failed: {:?}", e)).await;
        }
    }
}

/// Reports a fatal error and parks the device until it is reflashed or reset.
async fn halt(reason: core::fmt::Arguments<'_>) {
    log::error!("{}", reason);
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
