//! Best-match lookup against the system font database

use std::ptr;

use cairo::FontFace;
use fontconfig_sys::{statics::LIB, FcMatchPattern, FcPattern, FcResultMatch};

use crate::error::{FontError, FontResult};
use crate::font::{init, MatchedPattern, Pattern};

#[link(name = "cairo")]
unsafe extern "C" {
    // cairo-ft; takes its own reference to the pattern.
    fn cairo_ft_font_face_create_for_pattern(pattern: *mut FcPattern) -> *mut cairo::ffi::cairo_font_face_t;
}

/// Outcome of [`match_pattern`]. Both fields are `None` when nothing matched.
#[derive(Default)]
pub struct MatchResult {
    pub pattern: Option<MatchedPattern>,
    pub face: Option<FontFace>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }
}

impl std::fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchResult")
            .field("pattern", &self.pattern)
            .field("has_face", &self.face.is_some())
            .finish()
    }
}

/// Run configuration and default substitution on `query`, then pick the
/// best installed font.
///
/// Results are not cached here: the answer depends on the installed fonts,
/// so caching belongs to the caller, keyed by request.
pub fn try_match_pattern(mut query: Pattern) -> FontResult<MatchedPattern> {
    if !init::is_initialized() {
        return Err(FontError::NotInitialized);
    }

    // Both passes edit the query, never a published result.
    unsafe {
        (LIB.FcConfigSubstitute)(ptr::null_mut(), query.as_ptr(), FcMatchPattern);
        (LIB.FcDefaultSubstitute)(query.as_ptr());
    }

    let mut result = 0;
    let matched = unsafe { Pattern::from_raw((LIB.FcFontMatch)(ptr::null_mut(), query.as_ptr(), &raw mut result)) }
        .ok_or(FontError::NoMatch)?;
    if result != FcResultMatch {
        return Err(FontError::NoMatch);
    }

    Ok(MatchedPattern::new(matched))
}

/// Drawable cairo face for a matched font.
pub fn create_face_for_pattern(pattern: &MatchedPattern) -> FontResult<FontFace> {
    let face = unsafe { FontFace::from_raw_full(cairo_ft_font_face_create_for_pattern(pattern.as_ptr())) };
    let status = unsafe { cairo::ffi::cairo_font_face_status(face.to_raw_none()) };
    if status != 0 {
        return Err(FontError::FaceCreate);
    }
    Ok(face)
}

/// [`try_match_pattern`] followed by face creation, with failures logged.
///
/// A match whose face cannot be created still reports the pattern.
pub fn match_pattern(query: Pattern) -> MatchResult {
    let pattern = match try_match_pattern(query) {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::debug!("Font match failed: {}", e);
            return MatchResult::default();
        }
    };

    let face = match create_face_for_pattern(&pattern) {
        Ok(face) => Some(face),
        Err(e) => {
            tracing::warn!("Matched {:?} but could not create a face: {}", pattern.family(), e);
            None
        }
    };

    MatchResult {
        pattern: Some(pattern),
        face,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{build_pattern, FontDescription, GenericFamily};

    #[test]
    fn test_generic_request_resolves() {
        if !init::ensure_initialized() {
            eprintln!("fontconfig unavailable - skipping match test");
            return;
        }
        let description = FontDescription::new("sans-serif", 14.0).with_generic(GenericFamily::SansSerif);
        let query = build_pattern(&description).expect("pattern");
        let result = match_pattern(query);

        match result.pattern {
            Some(pattern) => {
                assert!(pattern.family().is_some());
                assert!(result.face.is_some());
            }
            None => eprintln!("No system fonts installed"),
        }
    }

    #[test]
    fn test_matching_is_deterministic() {
        if !init::ensure_initialized() {
            return;
        }
        let description = FontDescription::new("NoSuchFont", 12.0).with_generic(GenericFamily::Monospace);
        let first = match_pattern(build_pattern(&description).expect("pattern"));
        let second = match_pattern(build_pattern(&description).expect("pattern"));

        match (first.pattern, second.pattern) {
            (Some(a), Some(b)) => {
                assert!(!a.ptr_eq(&b));
                assert!(a.structurally_equal(&b));
                assert_eq!(a.hash_value(), b.hash_value());
            }
            (None, None) => eprintln!("No system fonts installed"),
            _ => panic!("same query matched once and failed once"),
        }
    }
}
