//! TFT panel controllers
//!
//! Drivers take an async [`SpiDevice`](embedded_hal_async::spi::SpiDevice)
//! for the bus (chip select is handled by the device) and
//! [`gatewatch_hal::OutputPin`]s for the data/command, reset and backlight
//! lines.

pub mod st7796;

pub use st7796::St7796;

use gatewatch_core::config::ConfigError;
use gatewatch_core::geometry::RegionError;

/// Panel driver error, generic over the SPI bus error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError<E> {
    /// Bus transfer failed
    Spi(E),
    /// Pixels written before `init` succeeded
    NotReady,
    /// Window outside the configured panel
    Region(RegionError),
    /// Pixel slice does not cover the window exactly
    LengthMismatch,
    /// Rejected panel configuration
    Config(ConfigError),
}

impl<E> From<RegionError> for PanelError<E> {
    fn from(e: RegionError) -> Self {
        PanelError::Region(e)
    }
}

impl<E> From<ConfigError> for PanelError<E> {
    fn from(e: ConfigError) -> Self {
        PanelError::Config(e)
    }
}

/// MADCTL (memory access control) bits shared by MIPI DCS controllers
pub mod madctl {
    /// Row address order (mirror Y)
    pub const MY: u8 = 0x80;
    /// Column address order (mirror X)
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// Vertical refresh order
    pub const ML: u8 = 0x10;
    /// BGR color filter order
    pub const BGR: u8 = 0x08;

    use gatewatch_core::config::{ColorOrder, Orientation};

    /// Build the MADCTL byte
    pub const fn from_orientation(orientation: Orientation, order: ColorOrder) -> u8 {
        let mut value = 0;
        if orientation.mirror_y {
            value |= MY;
        }
        if orientation.mirror_x {
            value |= MX;
        }
        if orientation.swap_xy {
            value |= MV;
        }
        if let ColorOrder::Bgr = order {
            value |= BGR;
        }
        value
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_landscape_default() {
            let value = from_orientation(Orientation::default(), ColorOrder::Rgb);
            assert_eq!(value, MV);
        }

        #[test]
        fn test_all_bits() {
            let orientation = Orientation {
                swap_xy: true,
                mirror_x: true,
                mirror_y: true,
            };
            assert_eq!(from_orientation(orientation, ColorOrder::Bgr), 0xE8);
        }
    }
}
