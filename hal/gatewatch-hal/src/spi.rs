//! SPI bus configuration
//!
//! The panel link is a write-only SPI master. Chip glue translates these
//! settings into its own peripheral configuration. The clock comes from
//! the panel configuration; this crate carries no default of its own.

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl SpiConfig {
    /// Build a configuration from a clock and a combined SPI mode
    pub fn with_mode(frequency: u32, mode: Mode) -> Self {
        let (polarity, phase) = mode.into();
        Self {
            frequency,
            polarity,
            phase,
        }
    }

    /// Combined SPI mode for this configuration
    pub fn mode(&self) -> Mode {
        match (self.polarity, self.phase) {
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
            (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
            (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
        }
    }

    /// Time to shift `bytes` out at the configured clock, in microseconds
    ///
    /// Ignores inter-byte gaps, so this is a lower bound.
    pub fn transfer_time_us(&self, bytes: u32) -> u32 {
        if self.frequency == 0 {
            return u32::MAX;
        }
        let bits = bytes as u64 * 8;
        ((bits * 1_000_000) / self.frequency as u64).min(u32::MAX as u64) as u32
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode0_idles_low_and_samples_first_edge() {
        let cfg = SpiConfig::with_mode(10_000_000, Mode::Mode0);
        assert_eq!(cfg.frequency, 10_000_000);
        assert_eq!(cfg.polarity, Polarity::IdleLow);
        assert_eq!(cfg.phase, Phase::CaptureOnFirstTransition);
    }

    #[test]
    fn test_mode_roundtrip() {
        for mode in [Mode::Mode0, Mode::Mode1, Mode::Mode2, Mode::Mode3] {
            assert_eq!(SpiConfig::with_mode(1_000_000, mode).mode(), mode);
        }
    }

    #[test]
    fn test_transfer_time_for_full_strip() {
        // 480 x 40 pixels, 2 bytes each, at 10 MHz
        let cfg = SpiConfig::with_mode(10_000_000, Mode::Mode0);
        assert_eq!(cfg.transfer_time_us(480 * 40 * 2), 30_720);
    }

    #[test]
    fn test_transfer_time_zero_clock() {
        let cfg = SpiConfig::with_mode(0, Mode::Mode0);
        assert_eq!(cfg.transfer_time_us(10), u32::MAX);
    }
}
