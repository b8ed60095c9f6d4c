//! Board-agnostic display refresh core for the gate status panel
//!
//! This crate contains everything between the widget tree and the SPI
//! bus that does not depend on a specific chip or panel:
//!
//! - Region geometry and the inclusive/exclusive coordinate translation
//! - The partial frame buffer that strips are rendered into
//! - The flush synchronizer (single outstanding transfer ticket)
//! - The cooperative render scheduler
//! - The dashboard model (gate statuses, clock, signal)
//! - Panel configuration types and the `panel.toml` parser
//! - Traits at the seams: transfer channel and render source

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod flush;
pub mod geometry;
pub mod scheduler;
pub mod traits;
