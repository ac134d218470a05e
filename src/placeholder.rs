//! Detection of template values that were never replaced.
//!
//! There is no way to tell a real value that happens to equal the example
//! from an unedited template, so this is an exact string match against the
//! examples shipped in `cfg.toml.example`. The port and topic examples are
//! usable defaults and are never flagged.

use heapless::Vec;

use crate::config::{Config, Field};

pub use crate::template::{BROKER_HOST_EXAMPLE, NETWORK_NAME_EXAMPLE, NETWORK_PASSPHRASE_EXAMPLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("`{0}` still holds its example value, edit cfg.toml before flashing")]
    PlaceholderValue(Field),
}

/// The documented example for `field`, if it has one.
pub const fn example(field: Field) -> Option<&'static str> {
    match field {
        Field::NetworkName => Some(NETWORK_NAME_EXAMPLE),
        Field::NetworkPassphrase => Some(NETWORK_PASSPHRASE_EXAMPLE),
        Field::BrokerHost => Some(BROKER_HOST_EXAMPLE),
        Field::BrokerPort | Field::Topic => None,
    }
}

pub fn is_placeholder(field: Field, value: &str) -> bool {
    example(field) == Some(value)
}

/// Anything exposing the configured text values by field.
pub trait TextFields {
    fn text(&self, field: Field) -> Option<&str>;
}

impl TextFields for Config {
    fn text(&self, field: Field) -> Option<&str> {
        Config::text(self, field)
    }
}

/// Every field of `values` still holding its example, in field order.
pub fn placeholders<T: TextFields + ?Sized>(values: &T) -> Vec<Field, 5> {
    let mut found = Vec::new();
    for field in Field::ALL {
        if let Some(value) = values.text(field) {
            if is_placeholder(field, value) {
                // capacity equals Field::ALL.len()
                let _ = found.push(field);
            }
        }
    }
    found
}

/// Fails on the first unreplaced field, logging all of them.
pub fn check<T: TextFields + ?Sized>(values: &T) -> Result<(), Error> {
    let found = placeholders(values);
    for field in found.iter() {
        log::error!("Configuration field `{}` still holds its example value", field);
    }
    match found.first() {
        Some(&field) => Err(Error::PlaceholderValue(field)),
        None => Ok(()),
    }
}
