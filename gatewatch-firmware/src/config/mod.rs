//! Panel configuration loading
//!
//! `panel.toml` is compiled into the firmware and validated by build.rs.
//! It is parsed again at boot by the no_std parser in gatewatch-core.

use defmt::*;
use gatewatch_core::config::{parse_panel_config, PanelConfig};
use gatewatch_hal::{Mode, SpiConfig};

/// Embedded panel configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../panel.toml");

/// Parse the embedded configuration
///
/// Falls back to the reference panel defaults if parsing fails or the
/// strip does not fit in `capacity` pixels.
pub fn load(capacity: usize) -> PanelConfig {
    let config = match parse_panel_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("panel.toml rejected ({:?}), using defaults", e);
            return PanelConfig::default();
        }
    };

    if config.buffer_len() > capacity {
        warn!(
            "Strip of {} pixels exceeds the {} pixel buffer, using defaults",
            config.buffer_len(),
            capacity
        );
        return PanelConfig::default();
    }

    info!(
        "Panel {}x{}, {} rows per strip, {} Hz, tick {} ms",
        config.geometry.width,
        config.geometry.height,
        config.geometry.strip_rows,
        config.pixel_clock_hz,
        config.tick_ms
    );
    let bytes = config.buffer_len() as u32 * 2;
    debug!(
        "Full strip takes at least {} us on the bus",
        spi_config(&config).transfer_time_us(bytes)
    );
    config
}

/// Panel link settings for a configuration
pub fn spi_config(config: &PanelConfig) -> SpiConfig {
    SpiConfig::with_mode(config.pixel_clock_hz, Mode::Mode0)
}
