//! Shared state between Embassy tasks
//!
//! The flush synchronizer is a plain `static`; the dashboard model has no
//! const constructor and lives in a `StaticCell` created by `main`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use gatewatch_core::dashboard::DashboardModel;
use gatewatch_core::flush::FlushSynchronizer;
use portable_atomic::{AtomicU32, Ordering};

/// Single-slot handoff between the render and transfer tasks
pub static FLUSH: FlushSynchronizer<'static> = FlushSynchronizer::new();

/// Dashboard model, written by the data tasks and read by the render task
pub type SharedModel = Mutex<CriticalSectionRawMutex, DashboardModel>;

/// Failed panel writes since the last [`take_transfer_failures`]
static TRANSFER_FAILURES: AtomicU32 = AtomicU32::new(0);

/// Count one failed panel write
pub fn note_transfer_failure() {
    TRANSFER_FAILURES.fetch_add(1, Ordering::Relaxed);
}

/// Read and reset the failure counter
pub fn take_transfer_failures() -> u32 {
    TRANSFER_FAILURES.swap(0, Ordering::Relaxed)
}
