//! Frame region buffer
//!
//! The panel is never backed by a full frame in RAM. Instead one strip of
//! at most `width x strip_rows` pixels is rendered, handed to the transfer
//! channel and reused once the transfer completes.
//!
//! [`FrameRegionBuffer`] owns the storage. [`PixelBuffer`] is the movable
//! view over it: whoever holds the view may write pixels. The view moves
//! into a transfer ticket on submit and comes back with the completion, so
//! the renderer cannot touch pixels that are still being clocked out.

/// Pixel buffer capacity errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError {
    /// Pixels requested
    pub requested: usize,
    /// Pixels available
    pub capacity: usize,
}

/// Backing storage for one strip of RGB565 pixels
pub struct FrameRegionBuffer<const N: usize> {
    data: [u16; N],
}

impl<const N: usize> Default for FrameRegionBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameRegionBuffer<N> {
    /// Create a zeroed buffer
    pub const fn new() -> Self {
        Self { data: [0; N] }
    }

    /// Capacity in pixels
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Borrow the storage as a movable pixel view
    ///
    /// In firmware the buffer lives in a `StaticCell`, so the view is
    /// `PixelBuffer<'static>`.
    pub fn pixels(&mut self) -> PixelBuffer<'_> {
        PixelBuffer::new(&mut self.data)
    }
}

/// Exclusive view of a frame region buffer
///
/// Holds the active length: the number of pixels rendered for the current
/// region. Resetting sets the length back to zero without touching memory.
#[derive(Debug)]
pub struct PixelBuffer<'b> {
    data: &'b mut [u16],
    len: usize,
}

impl<'b> PixelBuffer<'b> {
    /// Wrap raw storage
    pub fn new(data: &'b mut [u16]) -> Self {
        Self { data, len: 0 }
    }

    /// Total pixels available
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Pixels in the current region
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no region has been rendered since the last reset
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forget the current region
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Set the active length and return the writable pixels
    ///
    /// Contents are left as they were; the renderer is expected to
    /// overwrite every pixel in the region.
    pub fn prepare(&mut self, len: usize) -> Result<&mut [u16], CapacityError> {
        if len > self.data.len() {
            return Err(CapacityError {
                requested: len,
                capacity: self.data.len(),
            });
        }
        self.len = len;
        Ok(&mut self.data[..len])
    }

    /// Pixels of the current region
    pub fn as_slice(&self) -> &[u16] {
        &self.data[..self.len]
    }

    /// Mutable pixels of the current region
    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.data[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_sets_length() {
        let mut storage = FrameRegionBuffer::<64>::new();
        let mut pixels = storage.pixels();
        assert!(pixels.is_empty());
        assert_eq!(pixels.capacity(), 64);

        let slice = pixels.prepare(10).unwrap();
        slice.fill(0xF800);
        assert_eq!(pixels.len(), 10);
        assert!(pixels.as_slice().iter().all(|&p| p == 0xF800));
    }

    #[test]
    fn test_prepare_over_capacity() {
        let mut storage = FrameRegionBuffer::<16>::new();
        let mut pixels = storage.pixels();
        assert_eq!(
            pixels.prepare(17),
            Err(CapacityError {
                requested: 17,
                capacity: 16
            })
        );
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_reset_keeps_storage() {
        let mut storage = FrameRegionBuffer::<8>::new();
        let mut pixels = storage.pixels();
        pixels.prepare(8).unwrap().fill(0x1234);
        pixels.reset();
        assert!(pixels.is_empty());

        // Same memory comes back, nothing was cleared
        let slice = pixels.prepare(8).unwrap();
        assert_eq!(slice[7], 0x1234);
    }
}
