//! Transfer channel trait
//!
//! The asynchronous write path to the panel. Completion of the
//! `write_region` future is the hardware's "transfer done" signal: once it
//! resolves the pixel data has been shifted out and the buffer may be
//! overwritten.

use crate::flush::{FlushError, FlushSynchronizer, TicketId};
use crate::geometry::Region;

/// Asynchronous region writer
///
/// `region` uses exclusive upper bounds. `pixels` is row-major and exactly
/// `region.pixel_count()` long.
#[allow(async_fn_in_trait)]
pub trait TransferChannel {
    /// Error type for the underlying bus
    type Error;

    /// Write one region to the panel
    async fn write_region(&mut self, region: Region, pixels: &[u16]) -> Result<(), Self::Error>;
}

/// Outcome of serving one ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReport<E> {
    /// Ticket that was served
    pub id: TicketId,
    /// Region written
    pub region: Region,
    /// Bus result for the write
    pub result: Result<(), E>,
    /// Result of handing the ticket back
    pub completion: Result<(), FlushError>,
}

/// Take the next ticket, write it and complete it
///
/// The ticket is completed even when the write fails: the bus has stopped
/// reading the buffer either way, and a ticket that never completes would
/// stall the render loop for good.
pub async fn serve_transfer<'b, T: TransferChannel>(
    sync: &FlushSynchronizer<'b>,
    channel: &mut T,
) -> TransferReport<T::Error> {
    let ticket = sync.next_request().await;
    let id = ticket.id();
    let region = ticket.region();

    let result = channel.write_region(region, ticket.pixels()).await;
    let completion = sync.on_complete(ticket);

    TransferReport {
        id,
        region,
        result,
        completion,
    }
}
