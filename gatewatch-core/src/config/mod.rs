//! Panel configuration
//!
//! The firmware embeds `panel.toml` and reads it at boot with
//! [`parse_panel_config`]. The build script checks the same file on the
//! host, so a bad file fails the build rather than the bring-up.

mod limits;
pub mod toml;
pub mod types;

pub use self::toml::{parse_panel_config, ParseError};
pub use limits::*;
pub use types::*;
