//! Panel geometry and region types
//!
//! Two rectangle flavours meet in this crate. The widget toolkit works in
//! inclusive coordinates ([`Area`], `x2`/`y2` is the last pixel). The
//! transfer channel works in exclusive coordinates ([`Region`], `x2`/`y2`
//! is one past the last pixel). [`Area::to_region`] is the only place the
//! `+ 1` is applied; getting it wrong shifts every strip by one pixel.

/// Errors for region construction and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegionError {
    /// Zero-sized or inverted rectangle
    Empty,
    /// Rectangle extends past the panel edge
    OutOfBounds,
    /// Rectangle holds more pixels than the frame region buffer
    ExceedsBuffer,
    /// Coordinate does not fit the device coordinate type
    Overflow,
}

/// Rectangle in device pixels with exclusive upper bounds
///
/// Invariant: `x1 < x2` and `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Region {
    /// Create a region, rejecting empty or inverted rectangles
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Result<Self, RegionError> {
        if x1 >= x2 || y1 >= y2 {
            return Err(RegionError::Empty);
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.x2 - self.x1
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.y2 - self.y1
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Check the region lies inside a panel of the given size
    pub fn check_within(&self, geometry: &PanelGeometry) -> Result<(), RegionError> {
        if self.x2 > geometry.width || self.y2 > geometry.height {
            return Err(RegionError::OutOfBounds);
        }
        Ok(())
    }

    /// Inclusive rectangle covering the same pixels
    pub const fn to_area(&self) -> Area {
        Area {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2 - 1,
            y2: self.y2 - 1,
        }
    }
}

/// Rectangle in device pixels with inclusive upper bounds
///
/// This is what the widget toolkit hands out. Invariant: `x1 <= x2` and
/// `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Area {
    /// Create an area, rejecting inverted rectangles
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Result<Self, RegionError> {
        if x1 > x2 || y1 > y2 {
            return Err(RegionError::Empty);
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Area covering an entire panel
    pub fn full(geometry: &PanelGeometry) -> Result<Self, RegionError> {
        if geometry.width == 0 || geometry.height == 0 {
            return Err(RegionError::Empty);
        }
        Ok(Self {
            x1: 0,
            y1: 0,
            x2: geometry.width - 1,
            y2: geometry.height - 1,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Translate to the transfer channel's exclusive coordinates
    pub fn to_region(&self) -> Result<Region, RegionError> {
        let x2 = self.x2.checked_add(1).ok_or(RegionError::Overflow)?;
        let y2 = self.y2.checked_add(1).ok_or(RegionError::Overflow)?;
        Region::new(self.x1, self.y1, x2, y2)
    }

    /// Check whether two areas share at least one pixel
    pub const fn intersects(&self, other: &Area) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// Check whether `other` lies completely inside this area
    pub const fn contains(&self, other: &Area) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }

    /// Smallest area covering both
    pub fn union(&self, other: &Area) -> Area {
        Area {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Shared part of both areas, if any
    pub fn intersection(&self, other: &Area) -> Option<Area> {
        if !self.intersects(other) {
            return None;
        }
        Some(Area {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        })
    }
}

/// Fixed panel geometry
///
/// `strip_rows` is the height of the frame region buffer: the tallest
/// full-width strip that can be rendered in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    /// Width in pixels (after orientation is applied)
    pub width: u16,
    /// Height in pixels (after orientation is applied)
    pub height: u16,
    /// Frame region buffer height in rows
    pub strip_rows: u16,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            width: 480,
            height: 320,
            strip_rows: 40,
        }
    }
}

impl PanelGeometry {
    /// Pixels held by the frame region buffer
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.strip_rows as usize
    }

    /// Pixels in a full frame
    pub const fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that a region can be flushed in one transfer
    pub fn check_region(&self, region: &Region, capacity: usize) -> Result<(), RegionError> {
        region.check_within(self)?;
        if region.pixel_count() > capacity {
            return Err(RegionError::ExceedsBuffer);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_inclusive_to_exclusive() {
        let area = Area::new(0, 0, 9, 9).unwrap();
        let region = area.to_region().unwrap();
        assert_eq!(region, Region { x1: 0, y1: 0, x2: 10, y2: 10 });
        assert_eq!(region.pixel_count(), 100);
    }

    #[test]
    fn test_single_pixel_area() {
        let area = Area::new(5, 7, 5, 7).unwrap();
        assert_eq!(area.pixel_count(), 1);
        assert_eq!(area.to_region().unwrap(), Region::new(5, 7, 6, 8).unwrap());
    }

    #[test]
    fn test_empty_region_rejected() {
        assert_eq!(Region::new(3, 0, 3, 10), Err(RegionError::Empty));
        assert_eq!(Area::new(4, 0, 3, 10), Err(RegionError::Empty));
    }

    #[test]
    fn test_area_overflow() {
        let area = Area::new(0, 0, u16::MAX, 3).unwrap();
        assert_eq!(area.to_region(), Err(RegionError::Overflow));
    }

    #[test]
    fn test_region_bounds() {
        let geometry = PanelGeometry::default();
        let inside = Region::new(0, 0, 480, 320).unwrap();
        assert!(inside.check_within(&geometry).is_ok());

        let outside = Region::new(0, 0, 481, 10).unwrap();
        assert_eq!(outside.check_within(&geometry), Err(RegionError::OutOfBounds));
    }

    #[test]
    fn test_region_capacity() {
        let geometry = PanelGeometry::default();
        let strip = Region::new(0, 0, 480, 40).unwrap();
        assert!(geometry.check_region(&strip, geometry.buffer_len()).is_ok());

        let too_tall = Region::new(0, 0, 480, 41).unwrap();
        assert_eq!(
            geometry.check_region(&too_tall, geometry.buffer_len()),
            Err(RegionError::ExceedsBuffer)
        );
    }

    #[test]
    fn test_union_and_intersection() {
        let a = Area::new(0, 0, 9, 9).unwrap();
        let b = Area::new(5, 5, 14, 14).unwrap();
        assert!(a.intersects(&b));
        assert_eq!(a.union(&b), Area::new(0, 0, 14, 14).unwrap());
        assert_eq!(a.intersection(&b), Some(Area::new(5, 5, 9, 9).unwrap()));

        let c = Area::new(10, 0, 19, 9).unwrap();
        assert!(!a.intersects(&c));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_full_area() {
        let geometry = PanelGeometry::default();
        let full = Area::full(&geometry).unwrap();
        assert_eq!(full.pixel_count(), geometry.frame_len());
        assert_eq!(full.to_region().unwrap(), Region::new(0, 0, 480, 320).unwrap());
    }

    #[test]
    fn test_full_area_of_empty_panel() {
        let flat = PanelGeometry {
            width: 480,
            height: 0,
            strip_rows: 0,
        };
        assert_eq!(Area::full(&flat), Err(RegionError::Empty));
        let thin = PanelGeometry { width: 0, ..PanelGeometry::default() };
        assert_eq!(Area::full(&thin), Err(RegionError::Empty));
    }

    proptest! {
        #[test]
        fn prop_conversion_preserves_pixels(
            x1 in 0u16..1000, y1 in 0u16..1000, w in 0u16..500, h in 0u16..500
        ) {
            let area = Area::new(x1, y1, x1 + w, y1 + h).unwrap();
            let region = area.to_region().unwrap();
            prop_assert_eq!(region.x2, area.x2 + 1);
            prop_assert_eq!(region.y2, area.y2 + 1);
            prop_assert_eq!(region.pixel_count(), area.pixel_count());
            prop_assert_eq!(region.to_area(), area);
        }
    }
}
