//! Retained widget toolkit and dashboard view for Gatewatch
//!
//! This crate provides:
//! - Widgets (`Panel`, `Label`, `SignalIcon`) drawn with embedded-graphics
//! - `InvalidAreas`, the dirty-area list with coalescing
//! - `Screen`, a fixed widget tree that renders itself strip by strip
//!   into the frame region buffer and implements `RenderSource`
//! - `DashboardView`, the gate status layout bound to a `DashboardModel`
//!
//! # Architecture
//!
//! The widget tree is built once at start-up. After that the only thing
//! that changes is widget content (text, colour, signal bars). Changing a
//! widget invalidates its bounds; the render scheduler then pulls the
//! invalid areas out one strip at a time.
//!
//! ```text
//! DashboardModel ──apply()──► DashboardView ──invalidate──► Screen
//!                                                             │
//!                         RenderScheduler ◄──next_dirty_region┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod dashboard;
pub mod invalidate;
pub mod screen;
pub mod target;
pub mod theme;
pub mod widget;

// Re-export key types
pub use dashboard::{DashboardView, ViewConfig, ViewError};
pub use invalidate::InvalidAreas;
pub use screen::{Screen, WidgetId, MAX_WIDGETS};
pub use target::StripTarget;
pub use widget::{Label, Panel, SignalIcon, Widget};
