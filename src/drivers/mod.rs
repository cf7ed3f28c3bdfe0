//! Built-in drivers
//!
//! This module provides:
//! - The console driver for local testing
//! - The web driver for HTTP widget integrations
//! - Resolution of configured driver names to driver references

mod console;
mod web;

pub use console::ConsoleDriver;
pub use web::WebDriver;

use crate::config::BotConfig;
use parley_shared::{Driver, DriverList, DriverName, DriverRef};
use tracing::{debug, warn};

/// Map a configured driver name to a reference.
///
/// Built-in drivers resolve to their type (case-insensitive); anything else
/// is kept as a literal name.
pub fn resolve(name: &str) -> DriverRef {
    match name.to_ascii_lowercase().as_str() {
        "console" => DriverRef::of::<ConsoleDriver>(),
        "web" => DriverRef::of::<WebDriver>(),
        _ => DriverRef::name(name),
    }
}

/// Driver references for every driver named in the configuration
pub fn from_config(config: &BotConfig) -> DriverList {
    config.drivers.iter().map(|name| resolve(name)).collect()
}

/// Instances of the built-in drivers named in the configuration.
///
/// Drivers missing their configuration are still returned; a warning is
/// logged for each.
pub fn instantiate(config: &BotConfig) -> Vec<Box<dyn Driver>> {
    let drivers: Vec<Box<dyn Driver>> = config
        .drivers
        .iter()
        .filter_map(|name| -> Option<Box<dyn Driver>> {
            match name.to_ascii_lowercase().as_str() {
                "console" => Some(Box::new(ConsoleDriver)),
                "web" => {
                    let driver = WebDriver::new(config.web_endpoint.clone());
                    if let Some(endpoint) = driver.endpoint() {
                        debug!("Web driver replies to {}", endpoint);
                    }
                    Some(Box::new(driver))
                }
                _ => None,
            }
        })
        .collect();

    for driver in drivers.iter().filter(|driver| !driver.is_configured()) {
        warn!("Driver {} is not configured", driver.name());
    }

    drivers
}
