//! Gate status dashboard view
//!
//! Builds the fixed widget tree for the dashboard and keeps it in step
//! with a [`DashboardModel`]. Only widgets whose model field changed are
//! touched, so a single gate flip redraws one value label.

use core::fmt::Write;

use embedded_graphics::text::Alignment;
use gatewatch_core::buffer::PixelBuffer;
use gatewatch_core::color::ByteOrder;
use gatewatch_core::config::PanelConfig;
use gatewatch_core::dashboard::{ChangeSet, DashboardModel, Gate, GATE_COUNT};
use gatewatch_core::geometry::{Area, PanelGeometry, RegionError};
use gatewatch_core::traits::RenderSource;
use heapless::String;

use crate::screen::{Screen, ScreenFull, WidgetId};
use crate::theme::{self, rgb, Layout};
use crate::widget::{Label, Panel, SignalIcon, LABEL_LEN};

/// What the view needs to know about the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ViewConfig {
    pub geometry: PanelGeometry,
    pub byte_order: ByteOrder,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            geometry: PanelGeometry::default(),
            byte_order: ByteOrder::BigEndian,
        }
    }
}

impl From<&PanelConfig> for ViewConfig {
    fn from(config: &PanelConfig) -> Self {
        Self {
            geometry: config.geometry,
            byte_order: config.byte_order,
        }
    }
}

/// Dashboard could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewError {
    /// Panel geometry has no pixels
    Geometry(RegionError),
    /// Layout needs more widgets than the screen holds
    Full,
}

impl From<RegionError> for ViewError {
    fn from(e: RegionError) -> Self {
        ViewError::Geometry(e)
    }
}

impl From<ScreenFull> for ViewError {
    fn from(_: ScreenFull) -> Self {
        ViewError::Full
    }
}

/// Dashboard widget tree bound to the model
pub struct DashboardView {
    screen: Screen,
    clock: WidgetId,
    signal: WidgetId,
    values: [WidgetId; GATE_COUNT],
}

impl DashboardView {
    /// Build the widget tree showing the model's current state
    ///
    /// The whole screen starts invalid. Pending model changes are left in
    /// place; the next [`DashboardView::apply`] consumes them.
    pub fn new(model: &DashboardModel, config: ViewConfig) -> Result<Self, ViewError> {
        let background = rgb(theme::BACKGROUND);
        let header_bg = rgb(theme::HEADER_BG);
        let footer_bg = rgb(theme::FOOTER_BG);
        let text = rgb(theme::TEXT);

        let mut screen = Screen::new(&config.geometry, background, config.byte_order)?;
        let layout = Layout::new(&config.geometry);

        // Header
        screen.add(Panel::new(layout.header(), header_bg))?;
        screen.add(
            Label::new(layout.title(), theme::TITLE, theme::TEXT_FONT)
                .with_color(text)
                .with_background(header_bg)
                .with_alignment(Alignment::Center),
        )?;
        let signal = screen.add(SignalIcon::new(
            layout.signal(),
            rgb(theme::SIGNAL_ON),
            rgb(theme::SIGNAL_OFF),
            header_bg,
        ))?;
        let clock = screen.add(
            Label::new(layout.clock(), model.clock(), theme::TEXT_FONT)
                .with_color(text)
                .with_background(header_bg)
                .with_alignment(Alignment::Right),
        )?;

        // Body
        let mut values = [signal; GATE_COUNT];
        for (i, gate) in model.gates().iter().enumerate() {
            screen.add(
                Label::new(layout.gate_name(i), &gate_name(gate), theme::TEXT_FONT)
                    .with_color(text)
                    .with_background(background),
            )?;
            values[i] = screen.add(
                Label::new(layout.gate_value(i), gate.label(), theme::VALUE_FONT)
                    .with_color(rgb(gate.color()))
                    .with_background(background)
                    .with_alignment(Alignment::Center),
            )?;
        }

        // Footer
        screen.add(Panel::new(layout.footer(), footer_bg))?;
        screen.add(
            Label::new(layout.footer_text(), theme::FOOTER_TEXT, theme::TEXT_FONT)
                .with_color(text)
                .with_background(footer_bg),
        )?;

        let mut view = Self {
            screen,
            clock,
            signal,
            values,
        };
        view.screen
            .update_signal(signal, |icon| icon.set_level(model.signal()));
        Ok(view)
    }

    /// Push pending model changes into the widgets
    ///
    /// Returns the changes that were applied.
    pub fn apply(&mut self, model: &mut DashboardModel) -> ChangeSet {
        let changes = model.take_changes();

        for index in changes.gates() {
            if let Some(gate) = model.gate(index) {
                self.show_gate(gate);
            }
        }
        if changes.clock() {
            let clock = model.clock();
            self.screen
                .update_label(self.clock, |label| label.set_text(clock));
        }
        if changes.signal() {
            let level = model.signal();
            self.screen
                .update_signal(self.signal, |icon| icon.set_level(level));
        }
        changes
    }

    fn show_gate(&mut self, gate: &Gate) {
        let Some(&id) = self.values.get(gate.index as usize) else {
            return;
        };
        let color = rgb(gate.color());
        self.screen.update_label(id, |label| {
            // Both must run; no short-circuit
            let text = label.set_text(gate.label());
            let color = label.set_color(color);
            text | color
        });
    }

    /// Bounds of a gate's value label
    pub fn value_bounds(&self, index: usize) -> Option<Area> {
        self.values
            .get(index)
            .and_then(|&id| self.screen.bounds(id))
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}

impl RenderSource for DashboardView {
    fn has_dirty(&self) -> bool {
        self.screen.has_dirty()
    }

    fn next_dirty_region(&mut self, pixels: &mut PixelBuffer<'_>) -> Option<Area> {
        self.screen.next_dirty_region(pixels)
    }

    fn region_flushed(&mut self, area: Area) {
        self.screen.region_flushed(area);
    }
}

/// "GATE 1" ... "GATE 10"
fn gate_name(gate: &Gate) -> String<LABEL_LEN> {
    let mut name = String::new();
    let _ = write!(name, "GATE {}", gate.number());
    name
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use gatewatch_core::buffer::FrameRegionBuffer;
    use gatewatch_core::color::palette;
    use gatewatch_core::dashboard::{GateStatus, SignalLevel};
    use gatewatch_core::flush::FlushSynchronizer;
    use gatewatch_core::geometry::Region;
    use gatewatch_core::scheduler::{RenderScheduler, TickOutcome};
    use gatewatch_core::traits::{serve_transfer, TransferChannel};
    use embassy_futures::block_on;
    use embassy_futures::join::join;

    const STRIP: usize = 480 * 40;
    const FRAME: usize = 480 * 320;

    /// Hand out and acknowledge strips until clean; returns pixels drawn
    fn drain(view: &mut DashboardView, pixels: &mut PixelBuffer<'_>) -> usize {
        let mut drawn = 0;
        while let Some(strip) = view.next_dirty_region(pixels) {
            drawn += strip.pixel_count();
            view.region_flushed(strip);
        }
        drawn
    }

    /// Keeps a copy of every write
    #[derive(Default)]
    struct Capture {
        writes: Vec<(Region, Vec<u16>)>,
    }

    impl TransferChannel for Capture {
        type Error = ();

        async fn write_region(&mut self, region: Region, pixels: &[u16]) -> Result<(), ()> {
            self.writes.push((region, pixels.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_first_frame_covers_screen() {
        let model = DashboardModel::new();
        let mut view = DashboardView::new(&model, ViewConfig::default()).unwrap();
        let mut storage = FrameRegionBuffer::<STRIP>::new();
        let mut pixels = storage.pixels();

        assert_eq!(drain(&mut view, &mut pixels), FRAME);
        assert!(!view.has_dirty());
    }

    #[test]
    fn test_empty_geometry_refused() {
        let model = DashboardModel::new();
        let config = ViewConfig {
            geometry: PanelGeometry {
                width: 0,
                height: 320,
                strip_rows: 40,
            },
            byte_order: ByteOrder::BigEndian,
        };
        assert!(matches!(
            DashboardView::new(&model, config),
            Err(ViewError::Geometry(RegionError::Empty))
        ));
    }

    #[test]
    fn test_gate_change_redraws_only_its_label() {
        let mut model = DashboardModel::new();
        let mut view = DashboardView::new(&model, ViewConfig::default()).unwrap();
        let mut storage = FrameRegionBuffer::<STRIP>::new();
        let mut pixels = storage.pixels();
        view.apply(&mut model);
        drain(&mut view, &mut pixels);

        model.set_gate(3, GateStatus::Open);
        let changes = view.apply(&mut model);
        assert!(changes.gate(3));

        let strip = view.next_dirty_region(&mut pixels).unwrap();
        assert_eq!(Some(strip), view.value_bounds(3));
        assert!(strip.pixel_count() * 10 < FRAME);
        view.region_flushed(strip);
        assert!(!view.has_dirty());
    }

    #[test]
    fn test_unchanged_model_draws_nothing() {
        let mut model = DashboardModel::new();
        let mut view = DashboardView::new(&model, ViewConfig::default()).unwrap();
        let mut storage = FrameRegionBuffer::<STRIP>::new();
        let mut pixels = storage.pixels();
        drain(&mut view, &mut pixels);

        model.set_gate(0, GateStatus::Closed);
        assert!(view.apply(&mut model).is_empty());
        assert!(!view.has_dirty());
    }

    #[test]
    fn test_clock_and_signal_invalidate_header_widgets() {
        let mut model = DashboardModel::new();
        let mut view = DashboardView::new(&model, ViewConfig::default()).unwrap();
        let mut storage = FrameRegionBuffer::<STRIP>::new();
        let mut pixels = storage.pixels();
        drain(&mut view, &mut pixels);

        model.set_clock_seconds(59);
        model.set_signal(SignalLevel::Strong);
        view.apply(&mut model);

        let layout = Layout::new(&PanelGeometry::default());
        assert_eq!(
            view.screen().invalid_areas(),
            &[layout.clock(), layout.signal()]
        );
        assert_eq!(
            view.screen().label(view.clock).map(|l| l.text()),
            Some("00:00:59")
        );
    }

    #[test]
    fn test_toggle_gate_seven_end_to_end() {
        let mut model = DashboardModel::new();
        let mut view = DashboardView::new(&model, ViewConfig::default()).unwrap();
        let mut storage = FrameRegionBuffer::<STRIP>::new();
        let sync = FlushSynchronizer::new();
        let mut panel = Capture::default();
        let mut scheduler =
            RenderScheduler::new(&sync, PanelGeometry::default(), storage.pixels());

        // First frame, all gates closed
        let strips = FRAME / STRIP;
        let (flushed, _) = block_on(join(scheduler.flush_all(&mut view), async {
            for _ in 0..strips {
                serve_transfer(&sync, &mut panel).await;
            }
        }));
        assert_eq!(flushed, Ok(strips as u32));
        panel.writes.clear();

        model.toggle_gate(7);
        view.apply(&mut model);

        let outcome = block_on(scheduler.tick(&mut view)).unwrap();
        let expected = view.value_bounds(7).unwrap().to_region().unwrap();
        assert_eq!(outcome, TickOutcome::Flushed(expected));

        block_on(serve_transfer(&sync, &mut panel));
        assert_eq!(block_on(scheduler.tick(&mut view)), Ok(TickOutcome::Idle));
        assert_eq!(panel.writes.len(), 1);

        let (region, pixels) = &panel.writes[0];
        assert_eq!(*region, expected);
        let open = ByteOrder::BigEndian.encode(GateStatus::Open.color());
        let closed = ByteOrder::BigEndian.encode(GateStatus::Closed.color());
        assert!(pixels.contains(&open));
        assert!(!pixels.contains(&closed));
        assert_ne!(open, ByteOrder::BigEndian.encode(palette::BLACK));
    }
}
