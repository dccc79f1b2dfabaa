//! fontplat - platform font resolution for cairo renderers
//!
//! This crate bundles:
//! - fontconfig matching of abstract font requests
//! - cairo scaled fonts with display-aware rendering options
//! - value-type font handles usable as cache keys
//! - a GTK4 source for the desktop's antialiasing and hinting settings

pub use fontplat_core::*;
pub use fontplat_gtk4::{GtkSettingsOptions, XftSettings};
