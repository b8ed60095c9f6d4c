//! Render source trait for the retained widget toolkit

use crate::buffer::PixelBuffer;
use crate::geometry::Area;

/// Producer of dirty regions
///
/// Implemented by the widget toolkit. Coordinates are inclusive, as the
/// toolkit sees them; the scheduler converts before transfer.
pub trait RenderSource {
    /// Check whether any part of the screen needs redrawing
    fn has_dirty(&self) -> bool;

    /// Render the next dirty strip into `pixels`
    ///
    /// The toolkit splits large dirty areas into strips that fit
    /// `pixels.capacity()`. On success `pixels.len()` equals the returned
    /// area's pixel count. Returns `None` when nothing is dirty or the
    /// previous strip has not been acknowledged yet.
    fn next_dirty_region(&mut self, pixels: &mut PixelBuffer<'_>) -> Option<Area>;

    /// Acknowledge that a strip handed out earlier is finished with
    ///
    /// Called once the strip's transfer completed, or when the core
    /// refused to transfer it.
    fn region_flushed(&mut self, area: Area);
}
