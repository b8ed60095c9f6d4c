//! Reference board wiring
//!
//! | Signal        | GPIO |
//! |---------------|------|
//! | Gate 1..10    | 2-11 (pulled up, contact to GND) |
//! | Panel D/C     | 16   |
//! | Panel CS      | 17   |
//! | SPI0 SCK      | 18   |
//! | SPI0 MOSI     | 19   |
//! | Panel RESET   | 20   |
//! | Backlight     | 21   |
//!
//! SPI0 transmits through DMA channel 0.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use gatewatch_drivers::panel::St7796;
use gatewatch_hal_rp2040::RpOutput;

/// SPI bus with the panel's chip select
pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI0, Async>, Output<'static>, Delay>;

/// The dashboard panel
pub type Panel = St7796<PanelSpi, RpOutput<'static>, RpOutput<'static>, RpOutput<'static>>;

/// Gate input debounce period
pub const GATE_POLL_MS: u64 = 20;
