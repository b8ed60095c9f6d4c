//! Dashboard layout and colors
//!
//! Landscape layout for the 480x320 panel; other sizes scale the body rows
//! and columns.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐ 0
//! │ ▂▄▆        GATE STATUS             12:34:56  │ header
//! ├──────────────────────┬───────────────────────┤ 40
//! │ GATE 1          [X]  │ GATE 6           [X]  │
//! │ ...                  │ ...                   │ 5 rows
//! │ GATE 5          [X]  │ GATE 10          [X]  │
//! ├──────────────────────┴───────────────────────┤ height - 30
//! │ footer                                       │
//! └──────────────────────────────────────────────┘
//! ```

use embedded_graphics::mono_font::{ascii, MonoFont};
use embedded_graphics::pixelcolor::{raw::RawU16, Rgb565};
use gatewatch_core::color::palette;
use gatewatch_core::dashboard::GATE_COUNT;
use gatewatch_core::geometry::{Area, PanelGeometry};

pub const HEADER_HEIGHT: u16 = 40;
pub const FOOTER_HEIGHT: u16 = 30;
pub const COLUMNS: u16 = 2;
pub const ROWS_PER_COLUMN: u16 = (GATE_COUNT as u16).div_ceil(COLUMNS);

/// Gate value label size
pub const VALUE_WIDTH: u16 = 48;
pub const VALUE_HEIGHT: u16 = 40;

/// Inner horizontal margin
const PAD: u16 = 16;

pub const TITLE: &str = "GATE STATUS";
pub const FOOTER_TEXT: &str = "GATEWATCH";

pub const TEXT_FONT: &MonoFont<'static> = &ascii::FONT_9X15;
pub const VALUE_FONT: &MonoFont<'static> = &ascii::FONT_10X20;

pub const BACKGROUND: u16 = palette::BLACK;
pub const HEADER_BG: u16 = palette::NAVY;
pub const FOOTER_BG: u16 = palette::SLATE;
pub const TEXT: u16 = palette::WHITE;
pub const SIGNAL_ON: u16 = palette::GREEN;
pub const SIGNAL_OFF: u16 = palette::GREY;

/// Packed RGB565 word to an embedded-graphics color
pub fn rgb(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

/// Area from origin and size; zero sizes are bumped to one pixel
const fn rect(x: u16, y: u16, w: u16, h: u16) -> Area {
    let w = if w == 0 { 1 } else { w };
    let h = if h == 0 { 1 } else { h };
    Area {
        x1: x,
        y1: y,
        x2: x + w - 1,
        y2: y + h - 1,
    }
}

/// Computed widget positions for one panel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: u16,
    height: u16,
}

impl Layout {
    pub fn new(geometry: &PanelGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
        }
    }

    pub fn header(&self) -> Area {
        rect(0, 0, self.width, HEADER_HEIGHT)
    }

    pub fn title(&self) -> Area {
        let w = self.width / 2;
        rect((self.width - w) / 2, 0, w, HEADER_HEIGHT)
    }

    /// Signal icon, left side of the header
    pub fn signal(&self) -> Area {
        rect(8, 8, 32, 24)
    }

    /// Clock label, right side of the header
    pub fn clock(&self) -> Area {
        let w = 8 * 9 + 8;
        rect(self.width.saturating_sub(w + 8), 0, w, HEADER_HEIGHT)
    }

    pub fn footer(&self) -> Area {
        rect(0, self.body_bottom(), self.width, FOOTER_HEIGHT)
    }

    pub fn footer_text(&self) -> Area {
        rect(PAD, self.body_bottom(), self.width.saturating_sub(2 * PAD), FOOTER_HEIGHT)
    }

    fn body_bottom(&self) -> u16 {
        self.height.saturating_sub(FOOTER_HEIGHT)
    }

    fn row_height(&self) -> u16 {
        self.body_bottom().saturating_sub(HEADER_HEIGHT) / ROWS_PER_COLUMN
    }

    fn column_width(&self) -> u16 {
        self.width / COLUMNS
    }

    /// Top-left corner of a gate's row cell
    fn cell(&self, index: usize) -> (u16, u16) {
        let index = index as u16;
        let col = index / ROWS_PER_COLUMN;
        let row = index % ROWS_PER_COLUMN;
        (
            col * self.column_width(),
            HEADER_HEIGHT + row * self.row_height(),
        )
    }

    /// Gate value label (status glyph)
    pub fn gate_value(&self, index: usize) -> Area {
        let (x, y) = self.cell(index);
        let x = x + self.column_width().saturating_sub(VALUE_WIDTH + PAD);
        let y = y + self.row_height().saturating_sub(VALUE_HEIGHT) / 2;
        rect(x, y, VALUE_WIDTH, VALUE_HEIGHT)
    }

    /// Gate name label
    pub fn gate_name(&self, index: usize) -> Area {
        let (x, y) = self.cell(index);
        let w = self.column_width().saturating_sub(VALUE_WIDTH + 3 * PAD);
        rect(x + PAD, y, w, self.row_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(&PanelGeometry::default())
    }

    #[test]
    fn test_value_labels_do_not_overlap() {
        let layout = layout();
        for i in 0..GATE_COUNT {
            for j in i + 1..GATE_COUNT {
                assert!(!layout.gate_value(i).intersects(&layout.gate_value(j)));
            }
            assert!(!layout.gate_value(i).intersects(&layout.gate_name(i)));
        }
    }

    #[test]
    fn test_reference_positions() {
        let layout = layout();
        assert_eq!(layout.gate_value(0), rect(176, 45, 48, 40));
        assert_eq!(layout.gate_value(5), rect(416, 45, 48, 40));
        assert_eq!(layout.gate_value(9), rect(416, 245, 48, 40));
        assert_eq!(layout.footer(), rect(0, 290, 480, 30));
    }

    #[test]
    fn test_everything_on_screen() {
        let layout = layout();
        let screen = Area::full(&PanelGeometry::default()).unwrap();
        for i in 0..GATE_COUNT {
            assert!(screen.contains(&layout.gate_value(i)));
            assert!(screen.contains(&layout.gate_name(i)));
        }
        assert!(screen.contains(&layout.clock()));
        assert!(screen.contains(&layout.signal()));
    }
}
