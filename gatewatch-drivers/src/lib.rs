//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in gatewatch-core for the panel hardware:
//!
//! - ST7796 TFT controller over 4-wire SPI (implements `TransferChannel`)

#![no_std]
#![deny(unsafe_code)]

pub mod panel;
