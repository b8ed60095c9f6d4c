//! SPI configuration translation

use embassy_rp::spi::{Config, Phase, Polarity};
use gatewatch_hal::spi::{self, SpiConfig};

/// Translate panel link settings into an embassy-rp SPI config
pub fn panel_spi_config(cfg: &SpiConfig) -> Config {
    let mut config = Config::default();
    config.frequency = cfg.frequency;
    config.polarity = match cfg.polarity {
        spi::Polarity::IdleLow => Polarity::IdleLow,
        spi::Polarity::IdleHigh => Polarity::IdleHigh,
    };
    config.phase = match cfg.phase {
        spi::Phase::CaptureOnFirstTransition => Phase::CaptureOnFirstTransition,
        spi::Phase::CaptureOnSecondTransition => Phase::CaptureOnSecondTransition,
    };
    config
}
