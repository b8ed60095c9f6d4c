//! Retained screen
//!
//! A fixed widget tree plus its invalid area list. The tree is built once;
//! widgets are only ever updated in place. Rendering happens strip by
//! strip: each call to `next_dirty_region` takes the oldest invalid area,
//! cuts off as many full rows as fit in the buffer and draws every widget
//! overlapping that strip.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use gatewatch_core::buffer::PixelBuffer;
use gatewatch_core::color::ByteOrder;
use gatewatch_core::geometry::{Area, PanelGeometry, RegionError};
use gatewatch_core::traits::RenderSource;
use heapless::Vec;

use crate::invalidate::InvalidAreas;
use crate::target::StripTarget;
use crate::widget::{Label, Panel, SignalIcon, Widget};

/// Widgets a screen can hold
pub const MAX_WIDGETS: usize = 32;

/// Handle to a widget in a [`Screen`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetId(u8);

/// Widget tree is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenFull;

/// One widget in the tree
#[derive(Clone)]
pub enum Node {
    Panel(Panel),
    Label(Label),
    Signal(SignalIcon),
}

impl From<Panel> for Node {
    fn from(w: Panel) -> Self {
        Node::Panel(w)
    }
}

impl From<Label> for Node {
    fn from(w: Label) -> Self {
        Node::Label(w)
    }
}

impl From<SignalIcon> for Node {
    fn from(w: SignalIcon) -> Self {
        Node::Signal(w)
    }
}

impl Widget for Node {
    fn bounds(&self) -> Area {
        match self {
            Node::Panel(w) => w.bounds(),
            Node::Label(w) => w.bounds(),
            Node::Signal(w) => w.bounds(),
        }
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            Node::Panel(w) => w.draw(target),
            Node::Label(w) => w.draw(target),
            Node::Signal(w) => w.draw(target),
        }
    }
}

/// Fixed widget tree with dirty tracking
pub struct Screen {
    nodes: Vec<Node, MAX_WIDGETS>,
    invalid: InvalidAreas,
    background: Rgb565,
    order: ByteOrder,
    /// Strip handed out and not yet acknowledged
    pending: Option<Area>,
}

impl Screen {
    /// Empty screen; the whole area starts invalid so the first frame is
    /// drawn in full
    ///
    /// Fails with [`RegionError::Empty`] for a panel without pixels.
    pub fn new(
        geometry: &PanelGeometry,
        background: Rgb565,
        order: ByteOrder,
    ) -> Result<Self, RegionError> {
        let mut invalid = InvalidAreas::new(Area::full(geometry)?);
        invalid.invalidate_all();
        Ok(Self {
            nodes: Vec::new(),
            invalid,
            background,
            order,
            pending: None,
        })
    }

    /// Append a widget; later widgets draw on top of earlier ones
    pub fn add(&mut self, widget: impl Into<Node>) -> Result<WidgetId, ScreenFull> {
        let node = widget.into();
        let bounds = node.bounds();
        let id = WidgetId(self.nodes.len() as u8);
        self.nodes.push(node).map_err(|_| ScreenFull)?;
        self.invalid.invalidate(bounds);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bounds(&self, id: WidgetId) -> Option<Area> {
        self.nodes.get(id.0 as usize).map(|n| n.bounds())
    }

    pub fn label(&self, id: WidgetId) -> Option<&Label> {
        match self.nodes.get(id.0 as usize) {
            Some(Node::Label(label)) => Some(label),
            _ => None,
        }
    }

    /// Update a label and invalidate it if anything changed
    pub fn update_label(&mut self, id: WidgetId, f: impl FnOnce(&mut Label) -> bool) -> bool {
        let changed = match self.nodes.get_mut(id.0 as usize) {
            Some(Node::Label(label)) => f(label),
            _ => false,
        };
        if changed {
            self.invalidate_widget(id);
        }
        changed
    }

    /// Update a signal icon and invalidate it if anything changed
    pub fn update_signal(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut SignalIcon) -> bool,
    ) -> bool {
        let changed = match self.nodes.get_mut(id.0 as usize) {
            Some(Node::Signal(icon)) => f(icon),
            _ => false,
        };
        if changed {
            self.invalidate_widget(id);
        }
        changed
    }

    pub fn invalidate_widget(&mut self, id: WidgetId) {
        if let Some(bounds) = self.bounds(id) {
            self.invalid.invalidate(bounds);
        }
    }

    pub fn invalidate(&mut self, area: Area) {
        self.invalid.invalidate(area);
    }

    pub fn invalidate_all(&mut self) {
        self.invalid.invalidate_all();
    }

    /// Pending invalid areas, oldest first
    pub fn invalid_areas(&self) -> &[Area] {
        self.invalid.areas()
    }

    /// Strip waiting for acknowledgement
    pub fn pending(&self) -> Option<Area> {
        self.pending
    }

    /// Draw every widget overlapping `area` into `pixels`
    pub fn render(&self, area: Area, pixels: &mut [u16]) {
        let mut target = StripTarget::new(pixels, area, self.order);
        // StripTarget is infallible
        let _ = target.clear(self.background);
        for node in self.nodes.iter().filter(|n| n.bounds().intersects(&area)) {
            let _ = node.draw(&mut target);
        }
    }

    /// Cut the next strip off the oldest invalid area
    ///
    /// Full rows when the buffer holds at least one row of the area,
    /// otherwise a run of pixels from the first row.
    fn take_strip(&mut self, capacity: usize) -> Option<Area> {
        let area = self.invalid.pop_front()?;
        let width = area.width() as usize;

        if capacity < width {
            let strip = Area {
                x2: area.x1 + capacity as u16 - 1,
                y2: area.y1,
                ..area
            };
            if area.y2 > area.y1 {
                self.invalid.push_front(Area {
                    y1: area.y1 + 1,
                    ..area
                });
            }
            self.invalid.push_front(Area {
                x1: strip.x2 + 1,
                y2: area.y1,
                ..area
            });
            return Some(strip);
        }

        let rows = (capacity / width).min(area.height() as usize) as u16;
        let strip = Area {
            y2: area.y1 + rows - 1,
            ..area
        };
        if strip.y2 < area.y2 {
            self.invalid.push_front(Area {
                y1: strip.y2 + 1,
                ..area
            });
        }
        Some(strip)
    }
}

impl RenderSource for Screen {
    fn has_dirty(&self) -> bool {
        !self.invalid.is_empty()
    }

    fn next_dirty_region(&mut self, pixels: &mut PixelBuffer<'_>) -> Option<Area> {
        if self.pending.is_some() || pixels.capacity() == 0 {
            return None;
        }
        let strip = self.take_strip(pixels.capacity())?;
        let buf = match pixels.prepare(strip.pixel_count()) {
            Ok(buf) => buf,
            Err(_) => {
                self.invalid.push_front(strip);
                return None;
            }
        };
        self.render(strip, buf);
        self.pending = Some(strip);
        Some(strip)
    }

    fn region_flushed(&mut self, area: Area) {
        if self.pending == Some(area) {
            self.pending = None;
        }
    }
}
