//! fontplat core - fontconfig font resolution with cairo scaled fonts
//!
//! This crate turns an abstract font request into a concrete, drawable font
//! and gives the result value semantics so it can key a cache, independent
//! of any specific UI toolkit.

pub mod config;
pub mod constants;
pub mod drawing;
pub mod dummy_backend;
pub mod error;
pub mod font;
pub mod traits;

// Re-export main types
pub use config::{RenderingOptions, ResolverConfig};
pub use drawing::create_scaled_font;
pub use dummy_backend::{StaticFontOptions, SwitchableFontOptions};
pub use error::{FontError, FontResult};
pub use font::{
    build_pattern, ensure_initialized, match_pattern, FallbackSet, FontCache, FontDescription, FontPlatformData,
    GenericFamily, MatchResult, MatchedPattern, Pattern, PatternSlot,
};

// Re-export traits
pub use traits::*;
