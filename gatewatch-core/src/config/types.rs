//! Panel configuration types

use crate::color::ByteOrder;
use crate::geometry::PanelGeometry;
use crate::scheduler::DEFAULT_TICK_MS;

use super::limits::{self, DEFAULT_PIXEL_CLOCK_HZ, MAX_PIXEL_CLOCK_HZ};

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroSize,
    /// Strip rows zero or taller than the panel
    InvalidStripRows,
    /// Pixel clock zero or above [`MAX_PIXEL_CLOCK_HZ`]
    InvalidPixelClock,
    /// Render tick period is zero
    InvalidTick,
    /// Panel plus gap does not fit the controller's frame memory
    GapTooLarge,
}

/// Controller RAM color order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Scan direction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Exchange rows and columns (landscape on a portrait controller)
    pub swap_xy: bool,
    pub mirror_x: bool,
    pub mirror_y: bool,
}

impl Orientation {
    /// Frame memory size as (columns, rows) seen through this orientation
    pub const fn ram_window(&self) -> (u16, u16) {
        limits::ram_window(self.swap_xy)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            swap_xy: true,
            mirror_x: false,
            mirror_y: false,
        }
    }
}

/// Everything the firmware needs to bring up and drive the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub geometry: PanelGeometry,
    pub pixel_clock_hz: u32,
    pub orientation: Orientation,
    /// Column offset added to every window
    pub gap_x: u16,
    /// Row offset added to every window
    pub gap_y: u16,
    pub invert_color: bool,
    pub color_order: ColorOrder,
    pub byte_order: ByteOrder,
    /// Render loop period
    pub tick_ms: u32,
    pub backlight_active_high: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            geometry: PanelGeometry::default(),
            pixel_clock_hz: DEFAULT_PIXEL_CLOCK_HZ,
            orientation: Orientation::default(),
            gap_x: 0,
            gap_y: 0,
            invert_color: false,
            color_order: ColorOrder::Rgb,
            byte_order: ByteOrder::BigEndian,
            tick_ms: DEFAULT_TICK_MS,
            backlight_active_high: true,
        }
    }
}

impl PanelConfig {
    /// Reject values the panel or scheduler cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        if g.width == 0 || g.height == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if g.strip_rows == 0 || g.strip_rows > g.height {
            return Err(ConfigError::InvalidStripRows);
        }
        if self.pixel_clock_hz == 0 || self.pixel_clock_hz > MAX_PIXEL_CLOCK_HZ {
            return Err(ConfigError::InvalidPixelClock);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidTick);
        }
        let (columns, rows) = self.orientation.ram_window();
        if g.width as u32 + self.gap_x as u32 > columns as u32
            || g.height as u32 + self.gap_y as u32 > rows as u32
        {
            return Err(ConfigError::GapTooLarge);
        }
        Ok(())
    }

    /// Pixels per strip buffer
    pub fn buffer_len(&self) -> usize {
        self.geometry.buffer_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_panel() {
        let config = PanelConfig::default();
        assert_eq!(config.geometry.width, 480);
        assert_eq!(config.geometry.height, 320);
        assert_eq!(config.geometry.strip_rows, 40);
        assert_eq!(config.pixel_clock_hz, 10_000_000);
        assert!(config.orientation.swap_xy);
        assert_eq!(config.tick_ms, 10);
        assert_eq!(config.buffer_len(), 480 * 40);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_strip() {
        let mut config = PanelConfig::default();
        config.geometry.strip_rows = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidStripRows));
        config.geometry.strip_rows = 321;
        assert_eq!(config.validate(), Err(ConfigError::InvalidStripRows));
    }

    #[test]
    fn test_validate_rejects_clock_and_tick() {
        let mut config = PanelConfig::default();
        config.pixel_clock_hz = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPixelClock));

        let mut config = PanelConfig::default();
        config.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTick));
    }

    #[test]
    fn test_validate_rejects_gap_past_ram() {
        let mut config = PanelConfig::default();
        config.gap_x = 1;
        assert_eq!(config.validate(), Err(ConfigError::GapTooLarge));
        config.gap_x = 0;
        config.gap_y = 160;
        assert_eq!(config.validate(), Err(ConfigError::GapTooLarge));

        // Short panel: the gap fits under the 320 landscape rows
        config.geometry.height = 160;
        assert_eq!(config.validate(), Ok(()));
        config.gap_y = 161;
        assert_eq!(config.validate(), Err(ConfigError::GapTooLarge));
    }

    #[test]
    fn test_portrait_geometry_needs_native_scan() {
        let mut config = PanelConfig::default();
        config.geometry.width = 320;
        config.geometry.height = 480;
        assert!(config.orientation.swap_xy);
        assert_eq!(config.validate(), Err(ConfigError::GapTooLarge));

        config.orientation.swap_xy = false;
        assert_eq!(config.orientation.ram_window(), (320, 480));
        assert_eq!(config.validate(), Ok(()));
    }
}
