//! Widgets
//!
//! Each widget owns its bounds and content and knows how to draw itself in
//! screen coordinates. Setters report whether anything visible changed so
//! the caller only invalidates what it has to.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use gatewatch_core::dashboard::SignalLevel;
use gatewatch_core::geometry::Area;
use heapless::String;

/// Label text capacity
pub const LABEL_LEN: usize = 16;

/// Something that can be drawn into a strip
pub trait Widget {
    /// Screen area the widget covers (inclusive)
    fn bounds(&self) -> Area;

    /// Draw the widget; pixels outside the target are clipped by it
    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}

/// Inclusive area to an embedded-graphics rectangle
pub fn to_rect(area: &Area) -> Rectangle {
    Rectangle::new(
        Point::new(area.x1 as i32, area.y1 as i32),
        Size::new(area.width() as u32, area.height() as u32),
    )
}

/// Solid filled rectangle (header/footer bars)
#[derive(Debug, Clone)]
pub struct Panel {
    bounds: Area,
    fill: Rgb565,
}

impl Panel {
    pub fn new(bounds: Area, fill: Rgb565) -> Self {
        Self { bounds, fill }
    }
}

impl Widget for Panel {
    fn bounds(&self) -> Area {
        self.bounds
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.fill_solid(&to_rect(&self.bounds), self.fill)
    }
}

/// Single line of text, vertically centered in its bounds
#[derive(Clone)]
pub struct Label {
    bounds: Area,
    text: String<LABEL_LEN>,
    font: &'static MonoFont<'static>,
    color: Rgb565,
    background: Rgb565,
    alignment: Alignment,
}

impl Label {
    pub fn new(bounds: Area, text: &str, font: &'static MonoFont<'static>) -> Self {
        let mut label = Self {
            bounds,
            text: String::new(),
            font,
            color: Rgb565::WHITE,
            background: Rgb565::BLACK,
            alignment: Alignment::Left,
        };
        label.set_text(text);
        label
    }

    pub fn with_color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    /// Replace the text (truncated to [`LABEL_LEN`]); returns true if changed
    pub fn set_text(&mut self, text: &str) -> bool {
        let mut next = String::<LABEL_LEN>::new();
        for ch in text.chars() {
            if next.push(ch).is_err() {
                break;
            }
        }
        if next == self.text {
            return false;
        }
        self.text = next;
        true
    }

    /// Replace the text color; returns true if changed
    pub fn set_color(&mut self, color: Rgb565) -> bool {
        if color == self.color {
            return false;
        }
        self.color = color;
        true
    }

    fn anchor(&self) -> Point {
        let b = &self.bounds;
        let y = (b.y1 as i32 + b.y2 as i32) / 2;
        let x = match self.alignment {
            Alignment::Left => b.x1 as i32,
            Alignment::Center => (b.x1 as i32 + b.x2 as i32 + 1) / 2,
            Alignment::Right => b.x2 as i32,
        };
        Point::new(x, y)
    }
}

impl Widget for Label {
    fn bounds(&self) -> Area {
        self.bounds
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let rect = to_rect(&self.bounds);
        target.fill_solid(&rect, self.background)?;

        // Long text must not spill into neighbours
        let mut clipped = target.clipped(&rect);
        let character_style = MonoTextStyle::new(self.font, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(&self.text, self.anchor(), character_style, text_style)
            .draw(&mut clipped)?;
        Ok(())
    }
}

/// Three-bar signal strength icon
#[derive(Debug, Clone)]
pub struct SignalIcon {
    bounds: Area,
    level: SignalLevel,
    on: Rgb565,
    off: Rgb565,
    background: Rgb565,
}

impl SignalIcon {
    const BARS: u32 = 3;
    const GAP: u32 = 3;

    pub fn new(bounds: Area, on: Rgb565, off: Rgb565, background: Rgb565) -> Self {
        Self {
            bounds,
            level: SignalLevel::None,
            on,
            off,
            background,
        }
    }

    pub fn level(&self) -> SignalLevel {
        self.level
    }

    /// Returns true if the level changed
    pub fn set_level(&mut self, level: SignalLevel) -> bool {
        if level == self.level {
            return false;
        }
        self.level = level;
        true
    }
}

impl Widget for SignalIcon {
    fn bounds(&self) -> Area {
        self.bounds
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let rect = to_rect(&self.bounds);
        target.fill_solid(&rect, self.background)?;

        let width = rect.size.width;
        let height = rect.size.height;
        let bar_width = (width.saturating_sub(Self::GAP * (Self::BARS - 1)) / Self::BARS).max(1);
        let lit = self.level.bars() as u32;

        for i in 0..Self::BARS {
            let bar_height = (height * (i + 1) / Self::BARS).max(1);
            let x = rect.top_left.x + (i * (bar_width + Self::GAP)) as i32;
            let y = rect.top_left.y + (height - bar_height) as i32;
            let color = if i < lit { self.on } else { self.off };
            Rectangle::new(Point::new(x, y), Size::new(bar_width, bar_height))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)?;
        }
        Ok(())
    }
}
