#![cfg_attr(not(test), no_std)]

pub mod bringup;
pub mod config;
pub mod placeholder;
pub mod template;

pub use config::{Config, Field, Source, CONFIG, CONFIG_SOURCE};
