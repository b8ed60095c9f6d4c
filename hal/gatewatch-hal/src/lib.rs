//! Gatewatch Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the panel driver
//! needs, so the driver can be exercised on the host with mock pins and
//! implemented by chip-specific glue in the firmware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  gatewatch-hal-rp2040 (embassy-rp glue) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gatewatch-drivers (ST7796 panel)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gatewatch-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Data/command, reset and backlight lines
//! - [`spi::SpiConfig`] - Panel link settings (clock, mode)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key items at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{Mode, SpiConfig};
