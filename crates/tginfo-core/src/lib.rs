//! Core domain + application logic for the Telegram entity info service.
//!
//! This crate is intentionally framework-agnostic. Telegram and HTTP live behind
//! ports (traits) and adapter crates.

pub mod age;
pub mod config;
pub mod datacenter;
pub mod domain;
pub mod errors;
pub mod identifier;
pub mod logging;
pub mod ports;
pub mod resolver;
pub mod response;

pub use errors::{Error, Result};
