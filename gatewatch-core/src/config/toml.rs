//! Minimal TOML reader for `panel.toml`
//!
//! Handles only what the panel file uses:
//! - `[panel]`, `[orientation]` and `[timing]` section headers
//! - `key = value` pairs with integer, boolean and string values
//! - `#` comments, whole-line or trailing
//!
//! Unknown keys are ignored so older firmware can read newer files.
//! Missing keys keep their [`PanelConfig::default`] value.

use super::types::{ColorOrder, ConfigError, PanelConfig};
use crate::color::ByteOrder;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Parsed fine but the result is not a usable panel
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Orientation,
    Timing,
}

/// Parse and validate a panel configuration
pub fn parse_panel_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "panel" => Ok(Section::Panel),
        "orientation" => Ok(Section::Orientation),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Integers may use `_` separators (`10_000_000`)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits = heapless::String::<24>::new();
    for ch in value.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_color_order(value: &str) -> Result<ColorOrder, ParseError> {
    match parse_string(value) {
        "rgb" => Ok(ColorOrder::Rgb),
        "bgr" => Ok(ColorOrder::Bgr),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_byte_order(value: &str) -> Result<ByteOrder, ParseError> {
    match parse_string(value) {
        "big_endian" | "swapped" => Ok(ByteOrder::BigEndian),
        "native" => Ok(ByteOrder::Native),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PanelConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Panel => match key {
            "width" => config.geometry.width = parse_int(value)?,
            "height" => config.geometry.height = parse_int(value)?,
            "strip_rows" => config.geometry.strip_rows = parse_int(value)?,
            "pixel_clock_hz" => config.pixel_clock_hz = parse_int(value)?,
            "gap_x" => config.gap_x = parse_int(value)?,
            "gap_y" => config.gap_y = parse_int(value)?,
            "invert_color" => config.invert_color = parse_bool(value)?,
            "color_order" => config.color_order = parse_color_order(value)?,
            "byte_order" => config.byte_order = parse_byte_order(value)?,
            "backlight_active_high" => config.backlight_active_high = parse_bool(value)?,
            _ => {}
        },
        Section::Orientation => match key {
            "swap_xy" => config.orientation.swap_xy = parse_bool(value)?,
            "mirror_x" => config.orientation.mirror_x = parse_bool(value)?,
            "mirror_y" => config.orientation.mirror_y = parse_bool(value)?,
            _ => {}
        },
        Section::Timing => {
            if key == "tick_ms" {
                config.tick_ms = parse_int(value)?;
            }
        }
    }
    Ok(())
}
