//! Panel transfer task
//!
//! Serves flush tickets one at a time: writes the strip over SPI+DMA and
//! completes the ticket, which hands the buffer back to the render task.

use defmt::*;
use gatewatch_core::traits::serve_transfer;

use crate::board::Panel;
use crate::channels::{note_transfer_failure, FLUSH};

#[embassy_executor::task]
pub async fn transfer_task(mut panel: Panel) {
    info!("Transfer task started");

    loop {
        let report = serve_transfer(&FLUSH, &mut panel).await;

        if let Err(e) = report.result {
            note_transfer_failure();
            warn!(
                "Panel write failed for {:?}: {:?}",
                report.region,
                Debug2Format(&e)
            );
        }
        if let Err(e) = report.completion {
            error!("Completion for {:?} refused: {:?}", report.id, e);
        }
    }
}
