/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size of the heap in DRAM (internal memory)
pub const HEAP_SIZE: usize = 72 * 1024;

/// DHCP hostname and MQTT client identifier
pub const DEVICE_ID: &str = "stm-dp-node";

/// Size of the TCP socket receive buffer
pub const RX_BUFFER_SIZE: usize = 4096;
/// Size of the TCP socket transmit buffer
pub const TX_BUFFER_SIZE: usize = 4096;

/// Size of the MQTT client receive buffer for application data
pub const MQTT_RX_BUFFER_SIZE: usize = 1024;
/// Size of the MQTT client transmit buffer for application data
pub const MQTT_TX_BUFFER_SIZE: usize = 1024;
/// Maximum number of MQTT v5 properties per packet
pub const MQTT_MAX_PROPERTIES: usize = 5;
/// MQTT keep-alive, also the ping interval once connected
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// Upper bound for the association with the access point
pub const WIFI_CONNECT_TIMEOUT_SECS: u64 = 30;
/// Upper bound for DHCP to hand out an address
pub const DHCP_TIMEOUT_SECS: u64 = 30;
/// Idle TCP socket timeout
pub const SOCKET_TIMEOUT_SECS: u64 = 120;
