//! Dashboard state
//!
//! The small mutable model behind the panel: ten gate statuses, a signal
//! indicator and a clock string. Every mutation that actually changes a
//! value is recorded in a [`ChangeSet`] so the view can invalidate only the
//! affected widget.

pub mod gate;
pub mod model;

pub use gate::{Gate, GateStatus, GATE_COUNT};
pub use model::{ChangeSet, ClockText, DashboardModel, SignalLevel, CLOCK_LEN};
