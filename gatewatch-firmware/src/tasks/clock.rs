//! Clock task
//!
//! Once a second: show uptime as `HH:MM:SS` and derive the link indicator
//! from failed panel writes during the last second.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use gatewatch_core::dashboard::SignalLevel;

use crate::channels::{take_transfer_failures, SharedModel};

#[embassy_executor::task]
pub async fn clock_task(model: &'static SharedModel) {
    info!("Clock task started");

    let mut ticker = Ticker::every(Duration::from_secs(1));
    let start = Instant::now();

    loop {
        let seconds = start.elapsed().as_secs() as u32;
        let level = SignalLevel::from_failures(take_transfer_failures());

        let mut model = model.lock().await;
        model.set_clock_seconds(seconds);
        if model.set_signal(level) {
            debug!("Link level now {:?}", level);
        }
        drop(model);

        ticker.next().await;
    }
}
