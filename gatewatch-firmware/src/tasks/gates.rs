//! Gate sensor task
//!
//! Polls the ten gate contacts. A reading must be the same on two
//! consecutive polls before it reaches the model.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use gatewatch_core::dashboard::{GateStatus, GATE_COUNT};

use crate::board::GATE_POLL_MS;
use crate::channels::SharedModel;

#[embassy_executor::task]
pub async fn gates_task(inputs: [Input<'static>; GATE_COUNT], model: &'static SharedModel) {
    info!("Gates task started");

    let mut ticker = Ticker::every(Duration::from_millis(GATE_POLL_MS));
    let mut previous = [None::<bool>; GATE_COUNT];

    loop {
        ticker.next().await;

        let mut model = model.lock().await;
        for (index, (input, last)) in inputs.iter().zip(previous.iter_mut()).enumerate() {
            // Contact closes to ground
            let closed = input.is_low();
            if *last == Some(closed) && model.set_gate(index, GateStatus::from_contact(closed)) {
                debug!("Gate {} {}", index + 1, if closed { "closed" } else { "open" });
            }
            *last = Some(closed);
        }
    }
}
