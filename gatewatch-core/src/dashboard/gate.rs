//! Gate status types

use crate::color::palette;

/// Number of gates shown on the dashboard
pub const GATE_COUNT: usize = 10;

/// Gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateStatus {
    Open,
    #[default]
    Closed,
}

impl GateStatus {
    /// Glyph shown in the gate's value label
    pub const fn glyph(&self) -> &'static str {
        match self {
            GateStatus::Open => "O",
            GateStatus::Closed => "X",
        }
    }

    /// RGB565 color of the value label text
    pub const fn color(&self) -> u16 {
        match self {
            GateStatus::Open => palette::RED,
            GateStatus::Closed => palette::GREEN,
        }
    }

    /// Status from a contact reading (`true` when closed)
    pub const fn from_contact(closed: bool) -> Self {
        if closed {
            GateStatus::Closed
        } else {
            GateStatus::Open
        }
    }

    /// The opposite state
    pub const fn toggled(&self) -> Self {
        match self {
            GateStatus::Open => GateStatus::Closed,
            GateStatus::Closed => GateStatus::Open,
        }
    }
}

/// One gate entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gate {
    /// Position in the gate table (0-9)
    pub index: u8,
    /// Current state
    pub status: GateStatus,
}

impl Gate {
    /// Gate number shown to the operator (1-based)
    pub const fn number(&self) -> u8 {
        self.index + 1
    }

    /// Glyph shown in the value label
    pub const fn label(&self) -> &'static str {
        self.status.glyph()
    }

    /// Value label color
    pub const fn color(&self) -> u16 {
        self.status.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_closed() {
        assert_eq!(GateStatus::default(), GateStatus::Closed);
    }

    #[test]
    fn test_closed_is_green_x() {
        assert_eq!(GateStatus::Closed.glyph(), "X");
        assert_eq!(GateStatus::Closed.color(), palette::GREEN);
    }

    #[test]
    fn test_open_differs_from_closed() {
        assert_ne!(GateStatus::Open.glyph(), GateStatus::Closed.glyph());
        assert_ne!(GateStatus::Open.color(), GateStatus::Closed.color());
    }

    #[test]
    fn test_toggle_and_contact() {
        assert_eq!(GateStatus::Open.toggled(), GateStatus::Closed);
        assert_eq!(GateStatus::from_contact(true), GateStatus::Closed);
        assert_eq!(GateStatus::from_contact(false), GateStatus::Open);
    }

    #[test]
    fn test_gate_number() {
        let gate = Gate {
            index: 6,
            status: GateStatus::Open,
        };
        assert_eq!(gate.number(), 7);
        assert_eq!(gate.label(), "O");
    }
}
