//! Invalid area list
//!
//! Collects the screen areas that need redrawing. Overlapping areas are
//! merged so no pixel is rendered twice; when the list is full the whole
//! screen is invalidated instead of dropping anything.

use gatewatch_core::geometry::Area;
use heapless::Vec;

/// Separate dirty areas tracked before falling back to a full redraw
pub const MAX_INVALID_AREAS: usize = 16;

/// Dirty area list, oldest first
///
/// Invariant: areas are pairwise disjoint and inside the screen.
#[derive(Debug, Clone)]
pub struct InvalidAreas<const N: usize = MAX_INVALID_AREAS> {
    screen: Area,
    areas: Vec<Area, N>,
}

impl<const N: usize> InvalidAreas<N> {
    /// Empty list for a screen
    pub fn new(screen: Area) -> Self {
        Self {
            screen,
            areas: Vec::new(),
        }
    }

    /// Whole-screen area
    pub fn screen(&self) -> Area {
        self.screen
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Pending areas, oldest first
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Mark an area for redraw
    ///
    /// The area is clipped to the screen. Areas already covered are
    /// ignored; overlapping ones are merged into their bounding box.
    pub fn invalidate(&mut self, area: Area) {
        let Some(mut area) = area.intersection(&self.screen) else {
            return;
        };
        if self.areas.iter().any(|a| a.contains(&area)) {
            return;
        }

        while let Some(pos) = self.areas.iter().position(|a| a.intersects(&area)) {
            area = area.union(&self.areas.remove(pos));
        }

        if self.areas.push(area).is_err() {
            self.invalidate_all();
        }
    }

    /// Mark the whole screen for redraw
    pub fn invalidate_all(&mut self) {
        self.areas.clear();
        let _ = self.areas.push(self.screen);
    }

    /// Forget all pending areas
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    /// Take the oldest area
    pub fn pop_front(&mut self) -> Option<Area> {
        if self.areas.is_empty() {
            None
        } else {
            Some(self.areas.remove(0))
        }
    }

    /// Put an area back at the head of the list
    ///
    /// Used for the unrendered remainder of an area split into strips.
    pub fn push_front(&mut self, area: Area) {
        if self.areas.iter().any(|a| a.intersects(&area)) {
            // Something newer overlaps it; merging keeps the list disjoint
            self.invalidate(area);
            return;
        }
        if self.areas.insert(0, area).is_err() {
            self.invalidate_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn area(x1: u16, y1: u16, x2: u16, y2: u16) -> Area {
        Area::new(x1, y1, x2, y2).unwrap()
    }

    fn screen() -> Area {
        area(0, 0, 479, 319)
    }

    #[test]
    fn test_separate_areas_kept_in_order() {
        let mut list = InvalidAreas::<4>::new(screen());
        list.invalidate(area(0, 0, 9, 9));
        list.invalidate(area(100, 100, 109, 109));
        assert_eq!(list.areas(), &[area(0, 0, 9, 9), area(100, 100, 109, 109)]);
        assert_eq!(list.pop_front(), Some(area(0, 0, 9, 9)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_overlapping_areas_merge() {
        let mut list = InvalidAreas::<4>::new(screen());
        list.invalidate(area(0, 0, 9, 9));
        list.invalidate(area(20, 0, 29, 9));
        list.invalidate(area(5, 5, 24, 6));
        assert_eq!(list.areas(), &[area(0, 0, 29, 9)]);
    }

    #[test]
    fn test_covered_area_ignored() {
        let mut list = InvalidAreas::<4>::new(screen());
        list.invalidate(area(0, 0, 99, 99));
        list.invalidate(area(10, 10, 20, 20));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clipped_to_screen() {
        let mut list = InvalidAreas::<4>::new(screen());
        list.invalidate(area(470, 310, 500, 400));
        list.invalidate(area(600, 0, 700, 10));
        assert_eq!(list.areas(), &[area(470, 310, 479, 319)]);
    }

    #[test]
    fn test_overflow_falls_back_to_full_screen() {
        let mut list = InvalidAreas::<2>::new(screen());
        list.invalidate(area(0, 0, 1, 1));
        list.invalidate(area(10, 10, 11, 11));
        list.invalidate(area(20, 20, 21, 21));
        assert_eq!(list.areas(), &[screen()]);
    }

    #[test]
    fn test_push_front_remainder() {
        let mut list = InvalidAreas::<4>::new(screen());
        list.invalidate(area(0, 100, 9, 109));
        list.push_front(area(0, 40, 479, 79));
        assert_eq!(list.pop_front(), Some(area(0, 40, 479, 79)));
    }

    fn arb_area() -> impl Strategy<Value = Area> {
        (0u16..520, 0u16..360, 0u16..80, 0u16..80)
            .prop_map(|(x, y, w, h)| Area::new(x, y, x + w, y + h).unwrap())
    }

    proptest! {
        #[test]
        fn test_areas_disjoint_and_cover_input(inputs in prop::collection::vec(arb_area(), 1..24)) {
            let mut list = InvalidAreas::<8>::new(screen());
            for a in &inputs {
                list.invalidate(*a);
            }

            let areas = list.areas();
            for (i, a) in areas.iter().enumerate() {
                prop_assert!(screen().contains(a));
                for b in &areas[i + 1..] {
                    prop_assert!(!a.intersects(b));
                }
            }

            // Every on-screen corner of every input is still pending
            for a in inputs.iter().filter_map(|a| a.intersection(&screen())) {
                for (x, y) in [(a.x1, a.y1), (a.x2, a.y2)] {
                    let p = Area::new(x, y, x, y).unwrap();
                    prop_assert!(areas.iter().any(|b| b.contains(&p)));
                }
            }
        }
    }
}
