//! Font resolution against the system font database
//!
//! A [`FontDescription`] goes through the pattern builder, the fontconfig
//! matcher and the scaled-font factory, and ends up as a [`FontPlatformData`]
//! that can be drawn with and used as a hash key.

pub mod cache;
pub mod fallback;
pub mod init;
pub mod matcher;
pub mod pattern;
pub mod platform_data;

use std::ffi::CStr;
use std::hash::{Hash, Hasher};

pub use cache::FontCache;
pub use fallback::FallbackSet;
pub use init::ensure_initialized;
pub use matcher::{match_pattern, MatchResult};
pub use pattern::{build_pattern, try_build_pattern, MatchedPattern, Pattern, PatternSlot};
pub use platform_data::FontPlatformData;

use fontconfig_sys::constants::{FC_SLANT_ITALIC, FC_SLANT_ROMAN, FC_WEIGHT_BOLD, FC_WEIGHT_NORMAL};

use crate::constants::{BOLD_WEIGHT_THRESHOLD, GENERIC_MONOSPACE, GENERIC_SANS_SERIF, GENERIC_SERIF};

/// Coarse style bucket used as a matching hint next to the literal family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
    Standard,
    #[default]
    None,
}

impl GenericFamily {
    /// Family name fontconfig aliases this category to, if any.
    pub fn fontconfig_family(self) -> Option<&'static CStr> {
        match self {
            GenericFamily::Serif => Some(GENERIC_SERIF),
            GenericFamily::SansSerif => Some(GENERIC_SANS_SERIF),
            GenericFamily::Monospace => Some(GENERIC_MONOSPACE),
            GenericFamily::Standard => Some(GENERIC_SANS_SERIF),
            GenericFamily::None => None,
        }
    }
}

/// Immutable description of a wanted font, as computed by style resolution.
#[derive(Debug, Clone)]
pub struct FontDescription {
    pub family: String,
    pub pixel_size: f64,
    /// Ordinal weight on the 100-900 scale.
    pub weight: u16,
    pub italic: bool,
    pub generic: GenericFamily,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            family: crate::constants::DEFAULT_FONT_FAMILY.to_string(),
            pixel_size: crate::constants::DEFAULT_FONT_SIZE,
            weight: 400,
            italic: false,
            generic: GenericFamily::None,
        }
    }
}

impl FontDescription {
    pub fn new(family: &str, pixel_size: f64) -> Self {
        Self {
            family: family.to_string(),
            pixel_size,
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_generic(mut self, generic: GenericFamily) -> Self {
        self.generic = generic;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= BOLD_WEIGHT_THRESHOLD
    }

    /// Fontconfig weight constant. Only two buckets are used; finer weights
    /// would change which faces existing content renders with.
    pub fn fontconfig_weight(&self) -> i32 {
        if self.is_bold() {
            FC_WEIGHT_BOLD
        } else {
            FC_WEIGHT_NORMAL
        }
    }

    pub fn fontconfig_slant(&self) -> i32 {
        if self.italic {
            FC_SLANT_ITALIC
        } else {
            FC_SLANT_ROMAN
        }
    }
}

// Sizes compare by bit pattern so the description can key a hash map.
impl PartialEq for FontDescription {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.pixel_size.to_bits() == other.pixel_size.to_bits()
            && self.weight == other.weight
            && self.italic == other.italic
            && self.generic == other.generic
    }
}

impl Eq for FontDescription {}

impl Hash for FontDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.pixel_size.to_bits().hash(state);
        self.weight.hash(state);
        self.italic.hash(state);
        self.generic.hash(state);
    }
}
