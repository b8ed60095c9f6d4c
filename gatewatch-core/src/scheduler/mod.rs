//! Render scheduler
//!
//! Drives the widget toolkit one strip per tick and hands the strips to
//! the flush synchronizer.

pub mod render;

pub use render::{RenderError, RenderScheduler, RenderStats, TickOutcome, DEFAULT_TICK_MS};
