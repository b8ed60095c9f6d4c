//! RGB565 color helpers
//!
//! Pixels are stored as packed 16-bit RGB565 words. The panel expects the
//! high byte first on the wire, so the renderer may store words byte-swapped
//! (see [`ByteOrder`]) to let the DMA engine send the buffer untouched.

/// Pack an 8-bit-per-channel color into RGB565
pub const fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
}

/// In-memory order of the two bytes of a pixel word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// High byte first in memory (what the panel wants on the wire)
    #[default]
    BigEndian,
    /// Native little-endian words
    Native,
}

impl ByteOrder {
    /// Encode an RGB565 word for storage in the pixel buffer
    pub const fn encode(self, rgb565: u16) -> u16 {
        match self {
            // Little-endian target: swapping puts the high byte first
            ByteOrder::BigEndian => rgb565.swap_bytes(),
            ByteOrder::Native => rgb565,
        }
    }

    /// Decode a stored pixel back into an RGB565 word
    pub const fn decode(self, stored: u16) -> u16 {
        // Swapping is its own inverse
        self.encode(stored)
    }
}

/// Common dashboard colors
pub mod palette {
    use super::rgb888_to_rgb565;

    pub const BLACK: u16 = rgb888_to_rgb565(0, 0, 0);
    pub const WHITE: u16 = rgb888_to_rgb565(255, 255, 255);
    pub const GREEN: u16 = rgb888_to_rgb565(0, 255, 0);
    pub const RED: u16 = rgb888_to_rgb565(255, 0, 0);
    pub const AMBER: u16 = rgb888_to_rgb565(255, 176, 0);
    pub const GREY: u16 = rgb888_to_rgb565(96, 96, 96);
    pub const NAVY: u16 = rgb888_to_rgb565(16, 32, 72);
    pub const SLATE: u16 = rgb888_to_rgb565(28, 32, 40);
}
