//! Render task
//!
//! Draws the first frame with `flush_all`. After that, every tick pushes
//! model changes into the widget tree and lets the scheduler render and
//! submit at most one dirty strip.

use defmt::*;
use embassy_time::{Duration, Ticker};
use gatewatch_core::buffer::PixelBuffer;
use gatewatch_core::config::PanelConfig;
use gatewatch_core::scheduler::{RenderScheduler, TickOutcome};
use gatewatch_display::DashboardView;

use crate::channels::{SharedModel, FLUSH};

/// Ticks between statistics log lines
const STATS_EVERY: u32 = 6000;

#[embassy_executor::task]
pub async fn render_task(
    mut view: DashboardView,
    model: &'static SharedModel,
    pixels: PixelBuffer<'static>,
    config: PanelConfig,
) {
    info!("Render task started");

    let mut scheduler = RenderScheduler::new(&FLUSH, config.geometry, pixels);

    // First frame in one go, before the periodic loop takes over
    {
        let mut model = model.lock().await;
        view.apply(&mut model);
    }
    match scheduler.flush_all(&mut view).await {
        Ok(strips) => info!("First frame drawn in {} strips", strips),
        Err(e) => warn!("First frame incomplete: {:?}", e),
    }

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_ms as u64));

    loop {
        ticker.next().await;

        {
            let mut model = model.lock().await;
            view.apply(&mut model);
        }

        match scheduler.tick(&mut view).await {
            Ok(TickOutcome::Flushed(region)) => trace!("Flushing {:?}", region),
            Ok(TickOutcome::Idle) => {}
            Err(e) => warn!("Render tick failed: {:?}", e),
        }

        let stats = scheduler.stats();
        if stats.ticks % STATS_EVERY == 0 {
            debug!(
                "Render: {} flushes, {} pixels, {} busy waits, {} rejected",
                stats.flushes, stats.pixels_flushed, stats.busy_waits, stats.rejected_regions
            );
        }
    }
}
