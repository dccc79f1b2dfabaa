//! Alternate fonts for glyphs the primary match lacks

use std::collections::HashSet;
use std::ptr::{self, NonNull};

use fontconfig_sys::{statics::LIB, FcFontSet, FcPattern, FcResultMatch};

use crate::error::{FontError, FontResult};
use crate::font::{init, MatchedPattern, Pattern};

/// Fontconfig's ordered list of candidates for a matched font.
///
/// Owned by exactly one platform handle and never shared: a copied handle
/// starts without one and sorts again on demand.
pub struct FallbackSet {
    inner: NonNull<FcFontSet>,
}

impl FallbackSet {
    /// Sort installed fonts by closeness to `pattern`. With `trim`, fonts that
    /// add no glyph coverage over the ones before them are left out.
    pub fn compute(pattern: &MatchedPattern, trim: bool) -> FontResult<Self> {
        if !init::is_initialized() {
            return Err(FontError::NotInitialized);
        }

        let mut result = 0;
        // The returned FcFontSet is ours to free
        let raw = unsafe {
            (LIB.FcFontSort)(
                ptr::null_mut(),
                pattern.as_ptr(),
                trim as i32,
                ptr::null_mut(),
                &raw mut result,
            )
        };
        let set = FallbackSet {
            inner: NonNull::new(raw).ok_or(FontError::FallbackSort)?,
        };
        if result != FcResultMatch {
            return Err(FontError::FallbackSort);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        unsafe { (*self.inner.as_ptr()).nfont }.try_into().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> FallbackIter<'_> {
        FallbackIter { index: 0, set: self }
    }

    /// Family names in fallback order, each listed once.
    pub fn family_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.iter()
            .filter_map(|candidate| candidate.family().map(|name| name.into_owned()))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// First candidate whose coverage includes `ch`.
    pub fn first_covering(&self, ch: char) -> Option<MatchedPattern> {
        self.iter().find(|candidate| candidate.covers(ch))
    }
}

impl Drop for FallbackSet {
    fn drop(&mut self) {
        unsafe { (LIB.FcFontSetDestroy)(self.inner.as_ptr()) };
    }
}

impl std::fmt::Debug for FallbackSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSet").field("len", &self.len()).finish()
    }
}

pub struct FallbackIter<'a> {
    index: usize,
    set: &'a FallbackSet,
}

impl Iterator for FallbackIter<'_> {
    type Item = MatchedPattern;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.set.len() {
            return None;
        }
        let pattern: *mut FcPattern = unsafe { *(*self.set.inner.as_ptr()).fonts.add(self.index) };
        self.index += 1;
        // The set keeps its own reference; each candidate gets another.
        unsafe { Pattern::from_borrowed(pattern) }.map(MatchedPattern::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{build_pattern, match_pattern, FontDescription, GenericFamily};

    fn matched_sans() -> Option<MatchedPattern> {
        if !init::ensure_initialized() {
            eprintln!("fontconfig unavailable - skipping fallback test");
            return None;
        }
        let description = FontDescription::new("sans-serif", 12.0).with_generic(GenericFamily::SansSerif);
        let matched = match_pattern(build_pattern(&description)?).pattern;
        if matched.is_none() {
            eprintln!("No system fonts installed");
        }
        matched
    }

    #[test]
    fn test_fallback_set_lists_candidates() {
        let Some(primary) = matched_sans() else { return };
        let set = FallbackSet::compute(&primary, true).expect("fallback set");

        assert!(!set.is_empty());
        assert_eq!(set.iter().count(), set.len());

        let names = set.family_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_untrimmed_set_not_smaller() {
        let Some(primary) = matched_sans() else { return };
        let trimmed = FallbackSet::compute(&primary, true).expect("fallback set");
        let full = FallbackSet::compute(&primary, false).expect("fallback set");
        assert!(full.len() >= trimmed.len());
    }

    #[test]
    fn test_first_covering_basic_latin() {
        let Some(primary) = matched_sans() else { return };
        let set = FallbackSet::compute(&primary, true).expect("fallback set");
        if let Some(candidate) = set.first_covering('A') {
            assert!(candidate.covers('A'));
        }
    }
}
