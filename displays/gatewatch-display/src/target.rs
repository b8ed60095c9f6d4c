//! Strip draw target
//!
//! Widgets draw in screen coordinates; this target maps them into the
//! current strip of the frame region buffer and drops everything outside.
//! Colors are stored in the configured [`ByteOrder`] so the buffer can go
//! to the bus as-is.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::Rectangle,
};
use gatewatch_core::color::ByteOrder;
use gatewatch_core::geometry::Area;

/// Draw target over one strip
pub struct StripTarget<'p> {
    pixels: &'p mut [u16],
    area: Area,
    order: ByteOrder,
}

impl<'p> StripTarget<'p> {
    /// Wrap a pixel slice covering `area` (row-major, inclusive bounds)
    ///
    /// `pixels` must be exactly `area.pixel_count()` long.
    pub fn new(pixels: &'p mut [u16], area: Area, order: ByteOrder) -> Self {
        debug_assert_eq!(pixels.len(), area.pixel_count());
        Self {
            pixels,
            area,
            order,
        }
    }

    /// Screen area this strip covers
    pub fn area(&self) -> Area {
        self.area
    }

    /// Stored word for a color
    pub fn encode(&self, color: Rgb565) -> u16 {
        self.order.encode(RawU16::from(color).into_inner())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let a = &self.area;
        if x < a.x1 as i32 || x > a.x2 as i32 || y < a.y1 as i32 || y > a.y2 as i32 {
            return None;
        }
        let row = (y - a.y1 as i32) as usize;
        let col = (x - a.x1 as i32) as usize;
        Some(row * a.width() as usize + col)
    }
}

impl Dimensions for StripTarget<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.area.x1 as i32, self.area.y1 as i32),
            Size::new(self.area.width() as u32, self.area.height() as u32),
        )
    }
}

impl DrawTarget for StripTarget<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point.x, point.y) {
                self.pixels[i] = self.encode(color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        if clipped.is_zero_sized() {
            return Ok(());
        }

        let word = self.encode(color);
        let width = clipped.size.width as usize;
        for y in clipped.rows() {
            if let Some(start) = self.index(clipped.top_left.x, y) {
                self.pixels[start..start + width].fill(word);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_pixels_outside_strip_dropped() {
        let area = Area::new(10, 40, 13, 41).unwrap();
        let mut pixels = [0u16; 8];
        let mut target = StripTarget::new(&mut pixels, area, ByteOrder::Native);

        target
            .draw_iter([
                Pixel(Point::new(10, 40), Rgb565::WHITE),
                Pixel(Point::new(13, 41), Rgb565::RED),
                Pixel(Point::new(9, 40), Rgb565::WHITE),
                Pixel(Point::new(10, 42), Rgb565::WHITE),
            ])
            .unwrap();

        assert_eq!(pixels[0], 0xFFFF);
        assert_eq!(pixels[7], 0xF800);
        assert_eq!(pixels[1..7], [0; 6]);
    }

    #[test]
    fn test_fill_is_clipped_and_swapped() {
        let area = Area::new(0, 0, 3, 1).unwrap();
        let mut pixels = [0u16; 8];
        let mut target = StripTarget::new(&mut pixels, area, ByteOrder::BigEndian);

        Rectangle::new(Point::new(2, -5), Size::new(10, 6))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut target)
            .unwrap();

        // Only row 0, columns 2..=3 are covered
        assert_eq!(pixels, [0, 0, 0x00F8, 0x00F8, 0, 0, 0, 0]);
    }
}
