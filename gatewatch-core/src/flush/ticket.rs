//! Transfer tickets
//!
//! A [`TransferTicket`] is the only handle to an in-flight write. It owns
//! the pixel view for the duration of the transfer and cannot be cloned,
//! so handing it back through `on_complete` is the only way to release
//! the buffer.

use crate::buffer::PixelBuffer;
use crate::geometry::Region;

/// Identifier of a submitted transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TicketId(pub(crate) u32);

impl TicketId {
    /// Raw sequence number
    pub const fn value(&self) -> u32 {
        self.0
    }
}

/// One in-flight asynchronous write
#[derive(Debug)]
pub struct TransferTicket<'b> {
    pub(crate) id: TicketId,
    pub(crate) region: Region,
    pub(crate) pixels: PixelBuffer<'b>,
}

impl<'b> TransferTicket<'b> {
    /// Ticket identifier
    pub fn id(&self) -> TicketId {
        self.id
    }

    /// Target region (exclusive upper bounds)
    pub fn region(&self) -> Region {
        self.region
    }

    /// Pixel data to transfer, row-major, `region.pixel_count()` long
    pub fn pixels(&self) -> &[u16] {
        self.pixels.as_slice()
    }
}

/// A finished transfer, returning the pixel buffer to the renderer
#[derive(Debug)]
pub struct Completion<'b> {
    /// Ticket that completed
    pub id: TicketId,
    /// Region that was written
    pub region: Region,
    /// Buffer, now safe to overwrite
    pub pixels: PixelBuffer<'b>,
}
