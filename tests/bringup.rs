use embassy_futures::block_on;
use pretty_assertions::assert_eq;

use stm_dp_node::bringup::{BringUp, Error};
use stm_dp_node::placeholder;
use stm_dp_node::{Config, Field};

use crate::common::{collaborators, leak, Call};

mod common;

fn home() -> &'static Config {
    leak(Config::new("HomeNet", "s3cret!", "192.168.1.10", 1883, "stm/dp").expect("valid config"))
}

fn template() -> &'static Config {
    leak(
        Config::new(
            "YOUR_WIFI_SSID",
            "YOUR_WIFI_PASSWORD",
            "your-broker-host-or-ip",
            1883,
            "stm/dp",
        )
        .expect("template is structurally valid"),
    )
}

#[test]
fn unedited_template_never_touches_the_network() {
    let (network, broker, log) = collaborators(false, false);

    let result = block_on(BringUp::new(template(), network, broker).start());

    match result {
        Err(Error::Config(placeholder::Error::PlaceholderValue(field))) => {
            assert_eq!(field, Field::NetworkName)
        }
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("bring-up must refuse the template"),
    }
    assert!(log.borrow().is_empty(), "no network operation expected");
}

#[test]
fn leftover_broker_placeholder_is_fatal() {
    let config = leak(
        Config::new("HomeNet", "s3cret!", "your-broker-host-or-ip", 1883, "stm/dp").expect("valid config"),
    );
    let (network, broker, log) = collaborators(false, false);

    let result = block_on(BringUp::new(config, network, broker).start());

    assert!(matches!(
        result,
        Err(Error::Config(placeholder::Error::PlaceholderValue(Field::BrokerHost)))
    ));
    assert!(log.borrow().is_empty());
}

#[test]
fn edited_config_joins_then_connects() {
    let (network, broker, log) = collaborators(false, false);

    let session = block_on(BringUp::new(home(), network, broker).start()).expect("bring-up succeeds");

    assert_eq!(session.topic(), "stm/dp");
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Join {
                name: "HomeNet".to_string(),
                passphrase: "s3cret!".to_string(),
            },
            Call::Connect {
                host: "192.168.1.10".to_string(),
                port: 1883,
            },
        ]
    );
}

#[test]
fn session_publishes_to_default_topic() {
    let (network, broker, log) = collaborators(false, false);
    let mut session = block_on(BringUp::new(home(), network, broker).start()).expect("bring-up succeeds");

    block_on(session.publish(br#"{"dp_pa": 47.12, "samples": 9}"#)).expect("publish succeeds");

    assert_eq!(
        log.borrow().last(),
        Some(&Call::Publish {
            topic: "stm/dp".to_string(),
            payload: br#"{"dp_pa": 47.12, "samples": 9}"#.to_vec(),
        })
    );
}

#[test]
fn join_failure_skips_broker() {
    let (network, broker, log) = collaborators(true, false);

    let result = block_on(BringUp::new(home(), network, broker).start());

    assert!(matches!(result, Err(Error::Network("association rejected"))));
    assert_eq!(log.borrow().len(), 1, "only the join was attempted");
}

#[test]
fn broker_failure_is_reported_once() {
    let (network, broker, log) = collaborators(false, true);

    let result = block_on(BringUp::new(home(), network, broker).start());

    assert!(matches!(result, Err(Error::Broker("connection refused"))));
    let connects = log
        .borrow()
        .iter()
        .filter(|call| matches!(call, Call::Connect { .. }))
        .count();
    assert_eq!(connects, 1, "no retries at this layer");
}

#[test]
fn open_network_joins_with_empty_passphrase() {
    let config = leak(Config::new("CafeGuest", "", "broker.local", 8883, "cafe/dp").expect("valid config"));
    let (network, broker, log) = collaborators(false, false);

    let session = block_on(BringUp::new(config, network, broker).start()).expect("bring-up succeeds");

    assert_eq!(session.credentials().broker_port, 8883);
    assert_eq!(
        log.borrow().first(),
        Some(&Call::Join {
            name: "CafeGuest".to_string(),
            passphrase: String::new(),
        })
    );
}

#[test]
fn errors_render_for_logs() {
    let err: Error<&str, &str> = placeholder::Error::PlaceholderValue(Field::NetworkName).into();
    assert_eq!(
        err.to_string(),
        "refusing to start: `network_name` still holds its example value, edit cfg.toml before flashing"
    );
}
