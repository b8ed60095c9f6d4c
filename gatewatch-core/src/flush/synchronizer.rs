//! Flush synchronizer
//!
//! The render loop submits a region plus its pixel buffer and gets a
//! [`TicketId`] back immediately. The transfer side picks the ticket up
//! from a one-slot request channel, clocks the pixels out and hands the
//! ticket back through [`FlushSynchronizer::on_complete`], which may be
//! called from interrupt context. The completion carries the buffer back
//! to the renderer through a signal.
//!
//! Only one ticket may be outstanding. A second `submit` while the first is
//! still in flight is rejected with [`FlushError::Busy`] and the caller's
//! buffer is returned untouched. Rendering into a buffer that DMA is still
//! reading is what produced torn, doubled images on the panel.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_sync::signal::Signal;

use super::ticket::{Completion, TicketId, TransferTicket};
use crate::buffer::PixelBuffer;
use crate::geometry::Region;

/// Flush errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushError {
    /// A transfer is already outstanding
    Busy,
    /// Pixel count does not match the region size
    LengthMismatch,
    /// Completion for a ticket that is not the outstanding one
    UnknownTicket,
}

/// A rejected submission, returning the buffer to the caller
#[derive(Debug)]
pub struct Rejected<'b> {
    /// Why the submission was refused
    pub error: FlushError,
    /// The caller's buffer, unchanged
    pub pixels: PixelBuffer<'b>,
}

/// Synchronizer counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushStats {
    /// Tickets issued
    pub submitted: u32,
    /// Tickets completed
    pub completed: u32,
    /// Submissions refused because a ticket was outstanding
    pub busy_rejections: u32,
}

/// The single outstanding-ticket slot
struct Slot {
    outstanding: Option<TicketId>,
    next_id: u32,
    stats: FlushStats,
}

/// Serializes flushes to the display
///
/// Intended to live in a `static` so the render task, the transfer task and
/// interrupt handlers can share it by reference.
pub struct FlushSynchronizer<'b> {
    slot: BlockingMutex<CriticalSectionRawMutex, RefCell<Slot>>,
    requests: Channel<CriticalSectionRawMutex, TransferTicket<'b>, 1>,
    completions: Signal<CriticalSectionRawMutex, Completion<'b>>,
    idle: Signal<CriticalSectionRawMutex, ()>,
}

impl<'b> Default for FlushSynchronizer<'b> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'b> FlushSynchronizer<'b> {
    /// Create an idle synchronizer
    pub const fn new() -> Self {
        Self {
            slot: BlockingMutex::new(RefCell::new(Slot {
                outstanding: None,
                next_id: 0,
                stats: FlushStats {
                    submitted: 0,
                    completed: 0,
                    busy_rejections: 0,
                },
            })),
            requests: Channel::new(),
            completions: Signal::new(),
            idle: Signal::new(),
        }
    }

    /// Submit a region for transfer
    ///
    /// Returns immediately. On success the buffer travels inside the ticket
    /// until the matching completion.
    pub fn submit(
        &self,
        region: Region,
        pixels: PixelBuffer<'b>,
    ) -> Result<TicketId, Rejected<'b>> {
        if pixels.len() != region.pixel_count() {
            return Err(Rejected {
                error: FlushError::LengthMismatch,
                pixels,
            });
        }

        let issued = self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.outstanding.is_some() {
                slot.stats.busy_rejections = slot.stats.busy_rejections.wrapping_add(1);
                return None;
            }
            let id = TicketId(slot.next_id);
            slot.next_id = slot.next_id.wrapping_add(1);
            slot.outstanding = Some(id);
            slot.stats.submitted = slot.stats.submitted.wrapping_add(1);
            Some(id)
        });

        let Some(id) = issued else {
            return Err(Rejected {
                error: FlushError::Busy,
                pixels,
            });
        };

        match self.requests.try_send(TransferTicket { id, region, pixels }) {
            Ok(()) => Ok(id),
            Err(TrySendError::Full(ticket)) => {
                // Previous ticket never picked up; undo the reservation
                self.slot.lock(|slot| {
                    let mut slot = slot.borrow_mut();
                    slot.outstanding = None;
                    slot.stats.submitted = slot.stats.submitted.wrapping_sub(1);
                    slot.stats.busy_rejections = slot.stats.busy_rejections.wrapping_add(1);
                });
                Err(Rejected {
                    error: FlushError::Busy,
                    pixels: ticket.pixels,
                })
            }
        }
    }

    /// Wait for the next ticket to transfer (transfer side)
    pub async fn next_request(&self) -> TransferTicket<'b> {
        self.requests.receive().await
    }

    /// Report that a ticket's pixels have left the buffer
    ///
    /// Safe to call from interrupt context. Clears the outstanding slot,
    /// publishes the completion and wakes a parked submitter.
    pub fn on_complete(&self, ticket: TransferTicket<'b>) -> Result<(), FlushError> {
        self.slot.lock(|slot| {
            {
                let mut slot = slot.borrow_mut();
                if slot.outstanding != Some(ticket.id) {
                    return Err(FlushError::UnknownTicket);
                }
                slot.outstanding = None;
                slot.stats.completed = slot.stats.completed.wrapping_add(1);
            }
            self.completions.signal(Completion {
                id: ticket.id,
                region: ticket.region,
                pixels: ticket.pixels,
            });
            self.idle.signal(());
            Ok(())
        })
    }

    /// Wait for the outstanding transfer to complete and take its buffer
    pub async fn wait_complete(&self) -> Completion<'b> {
        self.completions.wait().await
    }

    /// Take a completion if one is ready, without waiting
    pub fn try_complete(&self) -> Option<Completion<'b>> {
        self.completions.try_take()
    }

    /// Wait until no ticket is outstanding
    ///
    /// Does not consume the completion; the buffer stays available to
    /// [`wait_complete`](Self::wait_complete).
    pub async fn wait_idle(&self) {
        while self.is_busy() {
            self.idle.wait().await;
        }
    }

    /// Check whether a ticket is outstanding
    pub fn is_busy(&self) -> bool {
        self.outstanding().is_some()
    }

    /// Identifier of the outstanding ticket
    pub fn outstanding(&self) -> Option<TicketId> {
        self.slot.lock(|slot| slot.borrow().outstanding)
    }

    /// Counter snapshot
    pub fn stats(&self) -> FlushStats {
        self.slot.lock(|slot| slot.borrow().stats)
    }
}
