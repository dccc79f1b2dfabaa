//! fontplat GTK4 - display rendering options for fontplat-core
//!
//! This crate supplies the `FontOptionsSource` a GTK4 application hands to
//! fontplat-core, so scaled fonts follow the desktop's antialiasing and
//! hinting settings.

mod settings;

pub use settings::{GtkSettingsOptions, XftSettings};

// Re-export fontplat-core types for convenience
pub use fontplat_core::*;
