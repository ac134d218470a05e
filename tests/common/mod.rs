use std::cell::RefCell;
use std::rc::Rc;

use stm_dp_node::bringup::{Broker, Network};
use stm_dp_node::Config;

/// Every call the collaborators saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Join { name: String, passphrase: String },
    Connect { host: String, port: u16 },
    Publish { topic: String, payload: Vec<u8> },
}

pub type Log = Rc<RefCell<Vec<Call>>>;

pub struct MockNetwork {
    pub log: Log,
    pub fail: bool,
}

impl Network for MockNetwork {
    type Error = &'static str;

    async fn join(&mut self, name: &'static str, passphrase: &'static str) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Call::Join {
            name: name.to_string(),
            passphrase: passphrase.to_string(),
        });
        if self.fail {
            Err("association rejected")
        } else {
            Ok(())
        }
    }
}

pub struct MockBroker {
    pub log: Log,
    pub fail: bool,
}

impl Broker for MockBroker {
    type Error = &'static str;

    async fn connect(&mut self, host: &'static str, port: u16) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Call::Connect {
            host: host.to_string(),
            port,
        });
        if self.fail {
            Err("connection refused")
        } else {
            Ok(())
        }
    }

    async fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Call::Publish {
            topic: topic.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

/// A network and a broker sharing one call log.
pub fn collaborators(network_fails: bool, broker_fails: bool) -> (MockNetwork, MockBroker, Log) {
    let log = Log::default();
    (
        MockNetwork {
            log: log.clone(),
            fail: network_fails,
        },
        MockBroker {
            log: log.clone(),
            fail: broker_fails,
        },
        log,
    )
}

pub fn leak(config: Config) -> &'static Config {
    Box::leak(Box::new(config))
}
