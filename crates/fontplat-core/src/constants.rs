// src/constants.rs
use std::ffi::CStr;

// Resolver defaults
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Requested weights at or above this map to bold, everything else to normal.
pub const BOLD_WEIGHT_THRESHOLD: u16 = 600;

// Generic family names understood by the stock fontconfig configuration
pub const GENERIC_SERIF: &CStr = c"serif";
pub const GENERIC_SANS_SERIF: &CStr = c"sans-serif";
pub const GENERIC_MONOSPACE: &CStr = c"monospace";
