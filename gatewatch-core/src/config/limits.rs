// Shared with gatewatch-firmware/build.rs through `include!`, so this file
// holds plain items and outer doc comments only.

/// Default SPI pixel clock
///
/// Higher clocks show a ghosted second image on the reference wiring.
pub const DEFAULT_PIXEL_CLOCK_HZ: u32 = 10_000_000;

/// Upper bound accepted for the pixel clock (ST7796 write cycle limit)
pub const MAX_PIXEL_CLOCK_HZ: u32 = 62_500_000;

/// Controller frame memory columns in native (portrait) scan order
pub const RAM_COLUMNS: u16 = 320;

/// Controller frame memory rows in native (portrait) scan order
pub const RAM_ROWS: u16 = 480;

/// Frame memory size as (columns, rows) once `swap_xy` is applied
pub const fn ram_window(swap_xy: bool) -> (u16, u16) {
    if swap_xy {
        (RAM_ROWS, RAM_COLUMNS)
    } else {
        (RAM_COLUMNS, RAM_ROWS)
    }
}
