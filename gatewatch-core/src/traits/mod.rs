//! Collaborator traits
//!
//! These traits define the interface between the refresh core and the
//! pieces on either side of it: the widget toolkit that produces pixels
//! and the hardware path that consumes them.

pub mod render;
pub mod transfer;

pub use render::RenderSource;
pub use transfer::{serve_transfer, TransferChannel, TransferReport};
