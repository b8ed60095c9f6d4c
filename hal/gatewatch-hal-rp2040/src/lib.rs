//! RP2040 glue for the Gatewatch HAL traits
//!
//! Wraps embassy-rp peripherals so the panel driver can use them:
//!
//! - [`gpio::RpOutput`] - push-pull output implementing [`gatewatch_hal::OutputPin`]
//! - [`spi::panel_spi_config`] - panel link settings to an embassy-rp SPI config

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

pub use gpio::RpOutput;
pub use spi::panel_spi_config;
