//! Resolved font handle usable both for drawing and as a cache key

use std::hash::{Hash, Hasher};

use cairo::{FontFace, ScaledFont};

use crate::drawing::create_scaled_font;
use crate::font::{build_pattern, match_pattern, FallbackSet, FontDescription, MatchResult, MatchedPattern, PatternSlot};
use crate::traits::FontOptionsSource;

/// A concrete font: the matched pattern, the scaled font built from it, and
/// lazily sorted fallbacks.
///
/// The pattern and scaled font are shared between clones by native
/// reference counting. The fallback set is private to each value: clones
/// start without one.
///
/// Equality follows the pattern: the same shared pattern (or both empty)
/// is equal, two valid patterns are compared structurally by fontconfig,
/// anything else is unequal. Hashing agrees with that.
pub struct FontPlatformData {
    size: f64,
    synthetic_bold: bool,
    synthetic_oblique: bool,
    pattern: PatternSlot,
    scaled_font: Option<ScaledFont>,
    fallbacks: Option<FallbackSet>,
}

impl FontPlatformData {
    /// Resolve `description` through the system font database.
    ///
    /// Never fails: when fontconfig is unusable or nothing matches, the
    /// result has no pattern and no scaled font.
    pub fn new(description: &FontDescription, ambient: Option<&dyn FontOptionsSource>) -> Self {
        let mut data = Self::synthetic(description.pixel_size, false, false);

        let Some(query) = build_pattern(description) else {
            return data;
        };
        let MatchResult { pattern, face } = match_pattern(query);
        if pattern.is_none() {
            tracing::debug!("No font resolved for {:?}", description.family);
        }

        data.pattern = PatternSlot::from(pattern);
        data.scaled_font = face.and_then(|face| Self::scale(&face, data.size, ambient));
        data
    }

    /// Placeholder for a synthetic style with no backing face yet.
    pub fn synthetic(size: f64, bold: bool, italic: bool) -> Self {
        FontPlatformData {
            size,
            synthetic_bold: bold,
            synthetic_oblique: italic,
            pattern: PatternSlot::Empty,
            scaled_font: None,
            fallbacks: None,
        }
    }

    /// Scale a caller-supplied face, skipping matching altogether.
    pub fn from_face(
        face: &FontFace,
        size: f64,
        bold: bool,
        italic: bool,
        ambient: Option<&dyn FontOptionsSource>,
    ) -> Self {
        let mut data = Self::synthetic(size, bold, italic);
        data.scaled_font = Self::scale(face, size, ambient);
        data
    }

    /// Deleted-entry marker for open-addressing tables. Unequal to every
    /// value, including other tombstones.
    pub fn tombstone() -> Self {
        let mut data = Self::synthetic(0.0, false, false);
        data.pattern = PatternSlot::Tombstone;
        data
    }

    fn scale(face: &FontFace, size: f64, ambient: Option<&dyn FontOptionsSource>) -> Option<ScaledFont> {
        match create_scaled_font(face, size, ambient) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!("Failed to create scaled font at size {}: {}", size, e);
                None
            }
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn synthetic_bold(&self) -> bool {
        self.synthetic_bold
    }

    pub fn synthetic_oblique(&self) -> bool {
        self.synthetic_oblique
    }

    pub fn pattern_slot(&self) -> &PatternSlot {
        &self.pattern
    }

    pub fn pattern(&self) -> Option<&MatchedPattern> {
        self.pattern.as_matched()
    }

    pub fn scaled_font(&self) -> Option<&ScaledFont> {
        self.scaled_font.as_ref()
    }

    /// A face is available for drawing.
    pub fn has_font(&self) -> bool {
        self.scaled_font.is_some()
    }

    pub fn is_tombstone(&self) -> bool {
        self.pattern.is_tombstone()
    }

    pub fn family_name(&self) -> Option<String> {
        Some(self.pattern()?.family()?.into_owned())
    }

    pub fn file_path(&self) -> Option<String> {
        Some(self.pattern()?.file()?.into_owned())
    }

    /// Whether the matched font declares monospace spacing. Fonts supplied
    /// directly as faces have no pattern to ask and report `false`.
    pub fn is_fixed_pitch(&self) -> bool {
        match self.pattern() {
            Some(pattern) => pattern.is_monospace(),
            None => false,
        }
    }

    /// Fallback candidates, sorted on first use.
    pub fn fallbacks(&mut self) -> Option<&FallbackSet> {
        self.fallbacks_with(true)
    }

    /// Like [`fallbacks`](Self::fallbacks); `trim` only applies when the set
    /// has not been computed yet.
    pub fn fallbacks_with(&mut self, trim: bool) -> Option<&FallbackSet> {
        if self.fallbacks.is_none() {
            let pattern = self.pattern.as_matched()?;
            match FallbackSet::compute(pattern, trim) {
                Ok(set) => self.fallbacks = Some(set),
                Err(e) => {
                    tracing::debug!("No fallbacks for {:?}: {}", pattern.family(), e);
                    return None;
                }
            }
        }
        self.fallbacks.as_ref()
    }

    pub fn has_computed_fallbacks(&self) -> bool {
        self.fallbacks.is_some()
    }

    /// Debugging text: fontconfig's rendering of the pattern, or empty.
    pub fn description(&self) -> String {
        self.pattern()
            .and_then(|pattern| pattern.pattern().unparse())
            .unwrap_or_default()
    }
}

impl Clone for FontPlatformData {
    fn clone(&self) -> Self {
        FontPlatformData {
            size: self.size,
            synthetic_bold: self.synthetic_bold,
            synthetic_oblique: self.synthetic_oblique,
            pattern: self.pattern.clone(),
            scaled_font: self.scaled_font.clone(),
            fallbacks: None,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // Fallbacks were sorted for the old pattern.
        self.fallbacks = None;
        self.size = source.size;
        self.synthetic_bold = source.synthetic_bold;
        self.synthetic_oblique = source.synthetic_oblique;
        self.pattern.clone_from(&source.pattern);
        self.scaled_font.clone_from(&source.scaled_font);
    }
}

impl PartialEq for FontPlatformData {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for FontPlatformData {}

impl Hash for FontPlatformData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
    }
}

impl std::fmt::Debug for FontPlatformData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontPlatformData")
            .field("size", &self.size)
            .field("synthetic_bold", &self.synthetic_bold)
            .field("synthetic_oblique", &self.synthetic_oblique)
            .field("family", &self.family_name())
            .field("has_font", &self.has_font())
            .field("fallbacks", &self.fallbacks)
            .finish()
    }
}
