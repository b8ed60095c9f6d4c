//! Gatewatch - Gate Status Panel Firmware
//!
//! Drives a 480x320 ST7796 dashboard from an RP2040. The UI renders into
//! one strip buffer; the transfer task pushes each strip over SPI+DMA and
//! hands the buffer back before the next strip is drawn.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use gatewatch_core::buffer::PixelBuffer;
use gatewatch_core::dashboard::DashboardModel;
use gatewatch_display::{DashboardView, ViewConfig};
use gatewatch_drivers::panel::St7796;
use gatewatch_hal_rp2040::{panel_spi_config, RpOutput};

use crate::board::Panel;
use crate::channels::SharedModel;

mod board;
mod channels;
mod config;
mod tasks;

/// Strip buffer size in pixels (480 x 40, ~38 KB); build.rs checks
/// panel.toml against the same figure
const STRIP_CAPACITY: usize = 480 * 40;

static STRIP: ConstStaticCell<[u16; STRIP_CAPACITY]> = ConstStaticCell::new([0; STRIP_CAPACITY]);
static MODEL: StaticCell<SharedModel> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Gatewatch firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(STRIP_CAPACITY);

    // Panel link: SPI0 transmit-only, DMA channel 0
    let spi_config = panel_spi_config(&config::spi_config(&config));
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let device = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(never) => match never {},
    };

    let mut panel: Panel = St7796::new(
        device,
        RpOutput::new(p.PIN_16, false),
        RpOutput::new(p.PIN_20, true),
        RpOutput::new(p.PIN_21, !config.backlight_active_high),
    );

    if let Err(e) = panel.init(&mut Delay, &config).await {
        error!("Panel bring-up failed: {:?}", Debug2Format(&e));
        park().await;
    }
    info!("Panel initialized");

    // Widget tree first, then hand the model to the tasks
    let model = DashboardModel::new();
    let view = match DashboardView::new(&model, ViewConfig::from(&config)) {
        Ok(view) => view,
        Err(e) => {
            error!("Dashboard build failed: {:?}", e);
            park().await
        }
    };
    let model: &'static SharedModel = MODEL.init(Mutex::new(model));

    let strip = STRIP.take();
    let pixels = PixelBuffer::new(&mut strip[..config.buffer_len()]);

    let gates = [
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
    ];

    spawner.spawn(tasks::transfer_task(panel)).unwrap();
    spawner
        .spawn(tasks::render_task(view, model, pixels, config))
        .unwrap();
    spawner.spawn(tasks::clock_task(model)).unwrap();
    spawner.spawn(tasks::gates_task(gates, model)).unwrap();

    info!("All tasks spawned");
}

/// Stop here for good; the panel stays dark
async fn park() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
