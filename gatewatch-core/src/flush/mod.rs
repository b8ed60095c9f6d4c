//! Flush synchronization
//!
//! Serializes render-then-transfer cycles between the render loop and the
//! transfer side. At most one transfer is in flight for the whole display.

pub mod synchronizer;
pub mod ticket;

pub use synchronizer::{FlushError, FlushStats, FlushSynchronizer, Rejected};
pub use ticket::{Completion, TicketId, TransferTicket};
