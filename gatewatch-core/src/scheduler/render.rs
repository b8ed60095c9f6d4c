//! Cooperative render scheduler
//!
//! One call to [`RenderScheduler::tick`] renders and submits at most one
//! strip. The firmware calls it from a fixed-period loop (10 ms); when
//! nothing is dirty the tick returns immediately and the loop sleeps.
//!
//! The scheduler owns the pixel buffer between transfers. If the previous
//! strip is still being transferred when the next one is due, the tick
//! waits for the completion instead of dropping or overwriting anything.

use crate::buffer::PixelBuffer;
use crate::flush::{Completion, FlushError, FlushSynchronizer, Rejected, TicketId};
use crate::geometry::{Area, PanelGeometry, Region, RegionError};
use crate::traits::RenderSource;

/// Render loop period in milliseconds
pub const DEFAULT_TICK_MS: u32 = 10;

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing to draw
    Idle,
    /// One strip submitted for transfer (exclusive coordinates)
    Flushed(Region),
}

/// Render errors
///
/// These are programming errors in the toolkit or configuration. The
/// offending strip is dropped and acknowledged; the loop can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Strip outside the panel or larger than the buffer
    Region(RegionError),
    /// Synchronizer refused the strip
    Flush(FlushError),
}

impl From<RegionError> for RenderError {
    fn from(e: RegionError) -> Self {
        RenderError::Region(e)
    }
}

/// Scheduler counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderStats {
    /// Ticks run
    pub ticks: u32,
    /// Ticks with nothing to draw
    pub idle_ticks: u32,
    /// Strips submitted
    pub flushes: u32,
    /// Pixels submitted
    pub pixels_flushed: u32,
    /// Submissions that had to wait for another transfer
    pub busy_waits: u32,
    /// Strips refused by validation
    pub rejected_regions: u32,
    /// Completions for tickets this scheduler did not issue
    pub stray_completions: u32,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    id: TicketId,
    area: Area,
}

/// Render scheduler
///
/// Invariant: exactly one of `pixels` and `in_flight` is set.
pub struct RenderScheduler<'s, 'b> {
    sync: &'s FlushSynchronizer<'b>,
    geometry: PanelGeometry,
    pixels: Option<PixelBuffer<'b>>,
    in_flight: Option<InFlight>,
    stats: RenderStats,
}

impl<'s, 'b> RenderScheduler<'s, 'b> {
    /// Create a scheduler owning the frame region buffer view
    pub fn new(
        sync: &'s FlushSynchronizer<'b>,
        geometry: PanelGeometry,
        pixels: PixelBuffer<'b>,
    ) -> Self {
        Self {
            sync,
            geometry,
            pixels: Some(pixels),
            in_flight: None,
            stats: RenderStats::default(),
        }
    }

    /// Panel geometry the scheduler validates against
    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Counter snapshot
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// True while a submitted strip has not completed
    pub fn is_flushing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Run one render step
    pub async fn tick<S: RenderSource>(
        &mut self,
        source: &mut S,
    ) -> Result<TickOutcome, RenderError> {
        self.stats.ticks = self.stats.ticks.wrapping_add(1);
        self.poll_completion(source);

        if !source.has_dirty() {
            self.stats.idle_ticks = self.stats.idle_ticks.wrapping_add(1);
            return Ok(TickOutcome::Idle);
        }

        let mut pixels = self.reclaim(source).await;
        let Some(area) = source.next_dirty_region(&mut pixels) else {
            self.pixels = Some(pixels);
            self.stats.idle_ticks = self.stats.idle_ticks.wrapping_add(1);
            return Ok(TickOutcome::Idle);
        };

        let region = match self.check(&area, &pixels) {
            Ok(region) => region,
            Err(e) => {
                self.refuse(area, pixels, source);
                return Err(e);
            }
        };

        self.submit(region, area, pixels, source).await?;
        Ok(TickOutcome::Flushed(region))
    }

    /// Tick until the toolkit is clean and the last transfer completed
    ///
    /// Returns the number of strips flushed. Needs the transfer side to be
    /// running concurrently.
    pub async fn flush_all<S: RenderSource>(&mut self, source: &mut S) -> Result<u32, RenderError> {
        let mut flushed = 0;
        while let TickOutcome::Flushed(_) = self.tick(source).await? {
            flushed += 1;
        }
        self.finish(source).await;
        Ok(flushed)
    }

    /// Wait for the in-flight strip, if any, and acknowledge it
    pub async fn finish<S: RenderSource>(&mut self, source: &mut S) {
        while self.in_flight.is_some() {
            let completion = self.sync.wait_complete().await;
            self.accept(completion, source);
        }
    }

    /// Acknowledge a finished transfer without waiting
    fn poll_completion<S: RenderSource>(&mut self, source: &mut S) {
        if let Some(completion) = self.sync.try_complete() {
            self.accept(completion, source);
        }
    }

    /// Get the buffer back, waiting for the in-flight transfer if needed
    async fn reclaim<S: RenderSource>(&mut self, source: &mut S) -> PixelBuffer<'b> {
        loop {
            if let Some(mut pixels) = self.pixels.take() {
                pixels.reset();
                return pixels;
            }
            let completion = self.sync.wait_complete().await;
            self.accept(completion, source);
        }
    }

    fn accept<S: RenderSource>(&mut self, completion: Completion<'b>, source: &mut S) {
        match self.in_flight {
            Some(flight) if flight.id == completion.id => {
                self.in_flight = None;
                self.pixels = Some(completion.pixels);
                source.region_flushed(flight.area);
            }
            _ => {
                self.stats.stray_completions = self.stats.stray_completions.wrapping_add(1);
            }
        }
    }

    fn check(&self, area: &Area, pixels: &PixelBuffer<'b>) -> Result<Region, RenderError> {
        let region = area.to_region()?;
        self.geometry.check_region(&region, pixels.capacity())?;
        if pixels.len() != region.pixel_count() {
            return Err(RenderError::Flush(FlushError::LengthMismatch));
        }
        Ok(region)
    }

    /// Drop a strip that will not be transferred
    fn refuse<S: RenderSource>(&mut self, area: Area, mut pixels: PixelBuffer<'b>, source: &mut S) {
        pixels.reset();
        self.pixels = Some(pixels);
        self.stats.rejected_regions = self.stats.rejected_regions.wrapping_add(1);
        source.region_flushed(area);
    }

    async fn submit<S: RenderSource>(
        &mut self,
        region: Region,
        area: Area,
        mut pixels: PixelBuffer<'b>,
        source: &mut S,
    ) -> Result<(), RenderError> {
        loop {
            match self.sync.submit(region, pixels) {
                Ok(id) => {
                    self.in_flight = Some(InFlight { id, area });
                    self.stats.flushes = self.stats.flushes.wrapping_add(1);
                    self.stats.pixels_flushed = self
                        .stats
                        .pixels_flushed
                        .wrapping_add(region.pixel_count() as u32);
                    return Ok(());
                }
                Err(Rejected {
                    error: FlushError::Busy,
                    pixels: returned,
                }) => {
                    // Never drop a frame: park until the slot frees up
                    self.stats.busy_waits = self.stats.busy_waits.wrapping_add(1);
                    pixels = returned;
                    self.sync.wait_idle().await;
                }
                Err(Rejected {
                    error,
                    pixels: returned,
                }) => {
                    self.refuse(area, returned, source);
                    return Err(RenderError::Flush(error));
                }
            }
        }
    }
}
