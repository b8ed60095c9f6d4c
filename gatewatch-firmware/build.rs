//! Build script for gatewatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Clock and frame memory limits, shared with gatewatch-core
mod limits {
    include!("../gatewatch-core/src/config/limits.rs");
}

/// Pixels in the firmware's strip buffer (`STRIP_CAPACITY` in main.rs)
const STRIP_CAPACITY: i64 = 480 * 40;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");
    println!("cargo:rerun-if-changed=../gatewatch-core/src/config/limits.rs");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a panel.toml configuration file.            ║\n\
            ║  Please create one in the gatewatch-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_panel(&config, swap_xy(&config), &mut errors);
    validate_orientation(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The firmware parser only knows these tables
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };
    for (name, value) in root {
        if !["panel", "orientation", "timing"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn int(table: &toml::value::Table, key: &str, default: i64, errors: &mut Vec<String>) -> i64 {
    match table.get(key) {
        None => default,
        Some(toml::Value::Integer(v)) => *v,
        Some(_) => {
            errors.push(format!("'{}' must be an integer", key));
            default
        }
    }
}

fn check_bool(table: &toml::value::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = table.get(key) {
        if !value.is_bool() {
            errors.push(format!("[{}] '{}' must be true or false", section, key));
        }
    }
}

fn check_choice(
    table: &toml::value::Table,
    key: &str,
    choices: &[&str],
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::String(s)) if choices.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!("'{}' must be one of {:?}", key, choices)),
    }
}

/// Orientation `swap_xy`, defaulting to landscape like the firmware
fn swap_xy(config: &toml::Value) -> bool {
    config
        .get("orientation")
        .and_then(|o| o.get("swap_xy"))
        .and_then(|v| v.as_bool())
        .unwrap_or(true)
}

fn validate_panel(config: &toml::Value, swap_xy: bool, errors: &mut Vec<String>) {
    let Some(panel) = config.get("panel").and_then(|p| p.as_table()) else {
        return;
    };

    let width = int(panel, "width", 480, errors);
    let height = int(panel, "height", 320, errors);
    let strip_rows = int(panel, "strip_rows", 40, errors);
    let clock = int(
        panel,
        "pixel_clock_hz",
        limits::DEFAULT_PIXEL_CLOCK_HZ as i64,
        errors,
    );
    let gap_x = int(panel, "gap_x", 0, errors);
    let gap_y = int(panel, "gap_y", 0, errors);

    if width <= 0 || height <= 0 {
        errors.push("width and height must be positive".to_string());
    }
    if strip_rows <= 0 || strip_rows > height {
        errors.push(format!("strip_rows must be 1-{}", height));
    }
    if width * strip_rows > STRIP_CAPACITY {
        errors.push(format!(
            "width * strip_rows exceeds the {} pixel strip buffer",
            STRIP_CAPACITY
        ));
    }
    let max_clock = limits::MAX_PIXEL_CLOCK_HZ as i64;
    if clock <= 0 || clock > max_clock {
        errors.push(format!("pixel_clock_hz must be 1-{}", max_clock));
    }
    if gap_x < 0 || gap_y < 0 {
        errors.push("gap_x and gap_y must not be negative".to_string());
    }
    let (columns, rows) = limits::ram_window(swap_xy);
    if width + gap_x > columns as i64 || height + gap_y > rows as i64 {
        errors.push(format!(
            "panel plus gap exceeds the {}x{} frame memory",
            columns, rows
        ));
    }

    check_bool(panel, "panel", "invert_color", errors);
    check_bool(panel, "panel", "backlight_active_high", errors);
    check_choice(panel, "color_order", &["rgb", "bgr"], errors);
    check_choice(panel, "byte_order", &["big_endian", "swapped", "native"], errors);
}

fn validate_orientation(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(orientation) = config.get("orientation").and_then(|o| o.as_table()) else {
        return;
    };
    for key in ["swap_xy", "mirror_x", "mirror_y"] {
        check_bool(orientation, "orientation", key, errors);
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing").and_then(|t| t.as_table()) else {
        return;
    };
    let tick = int(timing, "tick_ms", 10, errors);
    if tick <= 0 || tick > u32::MAX as i64 {
        errors.push("[timing] tick_ms must be positive".to_string());
    }
}
