//! Dashboard model with change tracking

use core::fmt::Write;

use heapless::String;

use super::gate::{Gate, GateStatus, GATE_COUNT};

/// Clock label capacity ("HH:MM:SS")
pub const CLOCK_LEN: usize = 8;

/// Clock label text
pub type ClockText = String<CLOCK_LEN>;

/// Link/signal indicator level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalLevel {
    #[default]
    None,
    Weak,
    Good,
    Strong,
}

impl SignalLevel {
    /// Number of lit bars in the signal icon (0-3)
    pub const fn bars(&self) -> u8 {
        match self {
            SignalLevel::None => 0,
            SignalLevel::Weak => 1,
            SignalLevel::Good => 2,
            SignalLevel::Strong => 3,
        }
    }

    /// Link level from the number of failed transfers in the last window
    pub const fn from_failures(failures: u32) -> Self {
        match failures {
            0 => SignalLevel::Strong,
            1 => SignalLevel::Good,
            2..=4 => SignalLevel::Weak,
            _ => SignalLevel::None,
        }
    }
}

/// Set of model fields changed since the last [`DashboardModel::take_changes`]
///
/// Bits 0-9 are gates, then clock and signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChangeSet(u16);

impl ChangeSet {
    const CLOCK: u16 = 1 << GATE_COUNT;
    const SIGNAL: u16 = 1 << (GATE_COUNT + 1);

    /// No changes
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every field changed
    pub const fn all() -> Self {
        Self((1 << (GATE_COUNT + 2)) - 1)
    }

    /// True if nothing changed
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Check a gate bit
    pub const fn gate(&self, index: usize) -> bool {
        index < GATE_COUNT && self.0 & (1 << index) != 0
    }

    /// Check the clock bit
    pub const fn clock(&self) -> bool {
        self.0 & Self::CLOCK != 0
    }

    /// Check the signal bit
    pub const fn signal(&self) -> bool {
        self.0 & Self::SIGNAL != 0
    }

    /// Indices of changed gates, ascending
    pub fn gates(&self) -> impl Iterator<Item = usize> + '_ {
        (0..GATE_COUNT).filter(move |&i| self.gate(i))
    }

    fn mark_gate(&mut self, index: usize) {
        self.0 |= 1 << index;
    }

    fn mark_clock(&mut self) {
        self.0 |= Self::CLOCK;
    }

    fn mark_signal(&mut self) {
        self.0 |= Self::SIGNAL;
    }
}

/// Dashboard model
///
/// Mutated by the data source, read by the render task once per tick.
/// Both run on the same executor; the firmware serializes access.
#[derive(Debug, Clone)]
pub struct DashboardModel {
    gates: [Gate; GATE_COUNT],
    clock: ClockText,
    signal: SignalLevel,
    changes: ChangeSet,
}

impl Default for DashboardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardModel {
    /// All gates closed, clock blank, no signal
    pub fn new() -> Self {
        Self {
            gates: core::array::from_fn(|i| Gate {
                index: i as u8,
                status: GateStatus::Closed,
            }),
            clock: String::new(),
            signal: SignalLevel::None,
            changes: ChangeSet::empty(),
        }
    }

    /// All gate entries in index order
    pub fn gates(&self) -> &[Gate; GATE_COUNT] {
        &self.gates
    }

    /// One gate entry
    pub fn gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Current clock text
    pub fn clock(&self) -> &str {
        self.clock.as_str()
    }

    /// Current signal level
    pub fn signal(&self) -> SignalLevel {
        self.signal
    }

    /// Set a gate's status
    ///
    /// Returns `true` if the status changed. Out-of-range indices are
    /// ignored.
    pub fn set_gate(&mut self, index: usize, status: GateStatus) -> bool {
        let Some(gate) = self.gates.get_mut(index) else {
            return false;
        };
        if gate.status == status {
            return false;
        }
        gate.status = status;
        self.changes.mark_gate(index);
        true
    }

    /// Flip a gate's status; returns the new status
    pub fn toggle_gate(&mut self, index: usize) -> Option<GateStatus> {
        let next = self.gates.get(index)?.status.toggled();
        self.set_gate(index, next);
        Some(next)
    }

    /// Set the clock text, truncated to [`CLOCK_LEN`] characters
    pub fn set_clock(&mut self, text: &str) -> bool {
        let mut next = ClockText::new();
        for ch in text.chars() {
            if next.push(ch).is_err() {
                break;
            }
        }
        if next == self.clock {
            return false;
        }
        self.clock = next;
        self.changes.mark_clock();
        true
    }

    /// Set the clock from seconds, formatted as `HH:MM:SS`
    ///
    /// Hours wrap at 100 to keep the label width fixed.
    pub fn set_clock_seconds(&mut self, seconds: u32) -> bool {
        let mut text = ClockText::new();
        let _ = write!(
            text,
            "{:02}:{:02}:{:02}",
            (seconds / 3600) % 100,
            (seconds / 60) % 60,
            seconds % 60
        );
        self.set_clock(&text)
    }

    /// Set the signal indicator
    pub fn set_signal(&mut self, level: SignalLevel) -> bool {
        if self.signal == level {
            return false;
        }
        self.signal = level;
        self.changes.mark_signal();
        true
    }

    /// Peek at pending changes
    pub fn changes(&self) -> ChangeSet {
        self.changes
    }

    /// Take and clear pending changes
    pub fn take_changes(&mut self) -> ChangeSet {
        core::mem::take(&mut self.changes)
    }
}
