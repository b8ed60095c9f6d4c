//! Embassy async tasks
//!
//! Each task runs independently and shares state through `channels`.

pub mod clock;
pub mod gates;
pub mod render;
pub mod transfer;

pub use clock::clock_task;
pub use gates::gates_task;
pub use render::render_task;
pub use transfer::transfer_task;
