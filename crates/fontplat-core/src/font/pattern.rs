//! Fontconfig patterns: the query built from a request and the matched result

use std::borrow::Cow;
use std::ffi::{c_char, CStr, CString};
use std::hash::{Hash, Hasher};
use std::ptr::{self, NonNull};

use fontconfig_sys::constants::{FC_CHARSET, FC_FAMILY, FC_FILE, FC_MONO, FC_PIXEL_SIZE, FC_SLANT, FC_SPACING, FC_WEIGHT};
use fontconfig_sys::{statics::LIB, FcCharSet, FcChar8, FcPattern, FcResultMatch};

use crate::error::{FontError, FontResult};
use crate::font::{init, FontDescription};

/// Owned reference to an `FcPattern`.
///
/// Not `Clone`: queries are edited in place by the `add_*` methods and by
/// matching, so copies are explicit through [`duplicate`](Self::duplicate).
/// Dropping releases the reference.
pub struct Pattern {
    inner: NonNull<FcPattern>,
}

impl Pattern {
    /// Empty query. Fails when fontconfig could not be initialized.
    pub fn new() -> FontResult<Self> {
        if !init::ensure_initialized() {
            return Err(FontError::NotInitialized);
        }
        unsafe { Self::from_raw((LIB.FcPatternCreate)()) }.ok_or(FontError::PatternCreate)
    }

    /// Adopt a reference the caller already owns.
    ///
    /// # Safety
    /// `raw` must be null or a live pattern whose reference is handed over.
    pub(crate) unsafe fn from_raw(raw: *mut FcPattern) -> Option<Self> {
        Some(Self { inner: NonNull::new(raw)? })
    }

    /// Take a new reference to a pattern owned by someone else.
    ///
    /// # Safety
    /// `raw` must be null or a live pattern.
    pub(crate) unsafe fn from_borrowed(raw: *mut FcPattern) -> Option<Self> {
        let inner = NonNull::new(raw)?;
        unsafe { (LIB.FcPatternReference)(inner.as_ptr()) };
        Some(Self { inner })
    }

    pub fn as_ptr(&self) -> *mut FcPattern {
        self.inner.as_ptr()
    }

    /// Independent copy (`FcPatternDuplicate`); edits to either side stay local.
    pub fn duplicate(&self) -> FontResult<Self> {
        unsafe { Self::from_raw((LIB.FcPatternDuplicate)(self.as_ptr())) }.ok_or(FontError::PatternCreate)
    }

    /// Another reference to the same native pattern.
    fn share(&self) -> Self {
        unsafe { (LIB.FcPatternReference)(self.as_ptr()) };
        Self { inner: self.inner }
    }

    pub fn add_string(&mut self, object: &'static CStr, value: &CStr) -> FontResult<()> {
        // Values passed to FcPatternAdd* are copied by fontconfig.
        let ok = unsafe {
            (LIB.FcPatternAddString)(self.as_ptr(), object.as_ptr(), value.as_ptr() as *const FcChar8)
        };
        Self::check_add(ok, object)
    }

    pub fn add_integer(&mut self, object: &'static CStr, value: i32) -> FontResult<()> {
        let ok = unsafe { (LIB.FcPatternAddInteger)(self.as_ptr(), object.as_ptr(), value) };
        Self::check_add(ok, object)
    }

    pub fn add_double(&mut self, object: &'static CStr, value: f64) -> FontResult<()> {
        let ok = unsafe { (LIB.FcPatternAddDouble)(self.as_ptr(), object.as_ptr(), value) };
        Self::check_add(ok, object)
    }

    fn check_add(ok: i32, object: &'static CStr) -> FontResult<()> {
        if ok != 0 {
            Ok(())
        } else {
            Err(FontError::PatternAdd {
                object: object.to_str().unwrap_or("<non-utf8>"),
            })
        }
    }

    /// The `n`th string value of `object`, if set.
    pub fn get_string(&self, object: &CStr, n: u32) -> Option<Cow<'_, str>> {
        let mut dest: *mut FcChar8 = ptr::null_mut();
        let result = unsafe {
            (LIB.FcPatternGetString)(self.as_ptr(), object.as_ptr(), n.try_into().ok()?, &raw mut dest)
        };
        if result != FcResultMatch {
            return None;
        }
        let dest = NonNull::new(dest)?;
        // The string lives as long as the pattern does.
        Some(unsafe { CStr::from_ptr(dest.as_ptr() as *const c_char) }.to_string_lossy())
    }

    pub fn get_int(&self, object: &CStr, n: u32) -> Option<i32> {
        let mut dest = 0;
        let result = unsafe {
            (LIB.FcPatternGetInteger)(self.as_ptr(), object.as_ptr(), n.try_into().ok()?, &raw mut dest)
        };
        (result == FcResultMatch).then_some(dest)
    }

    pub fn get_double(&self, object: &CStr, n: u32) -> Option<f64> {
        let mut dest = 0.0;
        let result = unsafe {
            (LIB.FcPatternGetDouble)(self.as_ptr(), object.as_ptr(), n.try_into().ok()?, &raw mut dest)
        };
        (result == FcResultMatch).then_some(dest)
    }

    /// All values of a string property, in pattern order.
    pub fn get_strings(&self, object: &CStr) -> Vec<String> {
        let mut values = Vec::new();
        let mut n = 0;
        while let Some(value) = self.get_string(object, n) {
            values.push(value.into_owned());
            n += 1;
        }
        values
    }

    /// Whether the pattern's coverage charset contains `ch`. A pattern
    /// without a charset covers nothing.
    pub fn covers(&self, ch: char) -> bool {
        let mut charset: *mut FcCharSet = ptr::null_mut();
        let result = unsafe { (LIB.FcPatternGetCharSet)(self.as_ptr(), FC_CHARSET.as_ptr(), 0, &raw mut charset) };
        if result != FcResultMatch || charset.is_null() {
            return false;
        }
        unsafe { (LIB.FcCharSetHasChar)(charset, ch as u32) != 0 }
    }

    /// Fontconfig's textual form of the pattern (`FcNameUnparse`).
    pub fn unparse(&self) -> Option<String> {
        let unparsed = NonNull::new(unsafe { (LIB.FcNameUnparse)(self.as_ptr()) })?;
        let text = unsafe { CStr::from_ptr(unparsed.as_ptr() as *const c_char) }
            .to_string_lossy()
            .into_owned();
        unsafe { (LIB.FcStrFree)(unparsed.as_ptr()) };
        Some(text)
    }
}

impl Drop for Pattern {
    fn drop(&mut self) {
        unsafe { (LIB.FcPatternDestroy)(self.as_ptr()) };
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unparse() {
            Some(text) => f.write_str(&text),
            None => f.debug_struct("Pattern").finish(),
        }
    }
}

/// Result of a best-match lookup: a concrete, installed font.
///
/// Shared by reference count between copies of a
/// [`FontPlatformData`](crate::font::FontPlatformData) and never mutated.
/// `PartialEq` is fontconfig's structural equality; use [`ptr_eq`](Self::ptr_eq)
/// for identity.
#[derive(Debug)]
pub struct MatchedPattern(Pattern);

impl Clone for MatchedPattern {
    fn clone(&self) -> Self {
        MatchedPattern(self.0.share())
    }
}

impl MatchedPattern {
    pub(crate) fn new(pattern: Pattern) -> Self {
        MatchedPattern(pattern)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.0
    }

    pub fn as_ptr(&self) -> *mut FcPattern {
        self.0.as_ptr()
    }

    /// Same native pattern instance.
    pub fn ptr_eq(&self, other: &MatchedPattern) -> bool {
        self.0.inner == other.0.inner
    }

    pub fn structurally_equal(&self, other: &MatchedPattern) -> bool {
        unsafe { (LIB.FcPatternEqual)(self.as_ptr(), other.as_ptr()) != 0 }
    }

    /// `FcPatternHash`, consistent with [`structurally_equal`](Self::structurally_equal).
    pub fn hash_value(&self) -> u32 {
        unsafe { (LIB.FcPatternHash)(self.as_ptr()) }
    }

    pub fn family(&self) -> Option<Cow<'_, str>> {
        self.0.get_string(FC_FAMILY, 0)
    }

    pub fn file(&self) -> Option<Cow<'_, str>> {
        self.0.get_string(FC_FILE, 0)
    }

    pub fn spacing(&self) -> Option<i32> {
        self.0.get_int(FC_SPACING, 0)
    }

    /// Unset spacing counts as proportional.
    pub fn is_monospace(&self) -> bool {
        self.spacing() == Some(FC_MONO)
    }

    pub fn covers(&self, ch: char) -> bool {
        self.0.covers(ch)
    }
}

impl PartialEq for MatchedPattern {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.structurally_equal(other)
    }
}

impl Eq for MatchedPattern {}

impl Hash for MatchedPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_value().hash(state);
    }
}

/// The pattern a platform handle holds.
///
/// `Empty` means "no font". `Tombstone` marks a deleted entry for callers
/// running their own open-addressing tables; it compares unequal to every
/// slot, itself included, so it must never be stored in a std `HashMap`.
#[derive(Clone, Debug, Default)]
pub enum PatternSlot {
    Valid(MatchedPattern),
    #[default]
    Empty,
    Tombstone,
}

impl PatternSlot {
    pub fn as_matched(&self) -> Option<&MatchedPattern> {
        match self {
            PatternSlot::Valid(pattern) => Some(pattern),
            PatternSlot::Empty | PatternSlot::Tombstone => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, PatternSlot::Valid(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PatternSlot::Empty)
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, PatternSlot::Tombstone)
    }

    /// Identity: both hold the same native pattern, or both are empty.
    pub fn same_instance(&self, other: &PatternSlot) -> bool {
        match (self, other) {
            (PatternSlot::Valid(a), PatternSlot::Valid(b)) => a.ptr_eq(b),
            (PatternSlot::Empty, PatternSlot::Empty) => true,
            _ => false,
        }
    }
}

impl From<Option<MatchedPattern>> for PatternSlot {
    fn from(pattern: Option<MatchedPattern>) -> Self {
        match pattern {
            Some(pattern) => PatternSlot::Valid(pattern),
            None => PatternSlot::Empty,
        }
    }
}

impl PartialEq for PatternSlot {
    fn eq(&self, other: &Self) -> bool {
        if self.same_instance(other) {
            tracing::trace!("pattern identity fast path");
            return true;
        }
        match (self, other) {
            (PatternSlot::Valid(a), PatternSlot::Valid(b)) => a.structurally_equal(b),
            _ => false,
        }
    }
}

impl Eq for PatternSlot {}

impl Hash for PatternSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let PatternSlot::Valid(pattern) = self {
            pattern.hash_value().hash(state);
        }
    }
}

/// Translate a request into a fontconfig query.
///
/// The query carries the literal family, then the generic family (if any) as
/// a second family so the matcher can fall back, then the two-bucket weight,
/// the slant and the exact pixel size. Any failed step discards the query.
pub fn try_build_pattern(description: &FontDescription) -> FontResult<Pattern> {
    let family = CString::new(description.family.as_str()).map_err(|_| FontError::InvalidFamilyName {
        name: description.family.clone(),
    })?;

    let mut pattern = Pattern::new()?;
    pattern.add_string(FC_FAMILY, &family)?;
    if let Some(generic) = description.generic.fontconfig_family() {
        pattern.add_string(FC_FAMILY, generic)?;
    }
    pattern.add_integer(FC_WEIGHT, description.fontconfig_weight())?;
    pattern.add_integer(FC_SLANT, description.fontconfig_slant())?;
    pattern.add_double(FC_PIXEL_SIZE, description.pixel_size)?;
    Ok(pattern)
}

/// [`try_build_pattern`] with the reason logged and dropped.
pub fn build_pattern(description: &FontDescription) -> Option<Pattern> {
    match try_build_pattern(description) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::debug!("Failed to build pattern for {:?}: {}", description.family, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{match_pattern, GenericFamily};
    use fontconfig_sys::constants::{FC_SLANT_ITALIC, FC_SLANT_ROMAN, FC_WEIGHT_BOLD, FC_WEIGHT_NORMAL};

    fn fontconfig_available() -> bool {
        if init::ensure_initialized() {
            true
        } else {
            eprintln!("fontconfig unavailable - skipping pattern test");
            false
        }
    }

    #[test]
    fn test_pattern_carries_request() {
        if !fontconfig_available() {
            return;
        }
        let description = FontDescription::new("DejaVu Sans", 16.0)
            .with_weight(400)
            .with_generic(GenericFamily::SansSerif);
        let pattern = build_pattern(&description).expect("pattern");

        assert_eq!(pattern.get_strings(FC_FAMILY), vec!["DejaVu Sans", "sans-serif"]);
        assert_eq!(pattern.get_int(FC_WEIGHT, 0), Some(FC_WEIGHT_NORMAL));
        assert_eq!(pattern.get_int(FC_SLANT, 0), Some(FC_SLANT_ROMAN));
        assert_eq!(pattern.get_double(FC_PIXEL_SIZE, 0), Some(16.0));
    }

    #[test]
    fn test_standard_maps_to_sans_serif() {
        if !fontconfig_available() {
            return;
        }
        let description = FontDescription::new("Foo", 12.0).with_generic(GenericFamily::Standard);
        let pattern = build_pattern(&description).expect("pattern");
        assert_eq!(pattern.get_strings(FC_FAMILY), vec!["Foo", "sans-serif"]);
    }

    #[test]
    fn test_no_generic_adds_single_family() {
        if !fontconfig_available() {
            return;
        }
        let description = FontDescription::new("Foo", 12.0).with_generic(GenericFamily::None);
        let pattern = build_pattern(&description).expect("pattern");
        assert_eq!(pattern.get_strings(FC_FAMILY), vec!["Foo"]);
    }

    #[test]
    fn test_bold_italic_request() {
        if !fontconfig_available() {
            return;
        }
        let description = FontDescription::new("Foo", 12.0)
            .with_weight(900)
            .with_italic(true)
            .with_generic(GenericFamily::Monospace);
        let pattern = build_pattern(&description).expect("pattern");
        assert_eq!(pattern.get_int(FC_WEIGHT, 0), Some(FC_WEIGHT_BOLD));
        assert_eq!(pattern.get_int(FC_SLANT, 0), Some(FC_SLANT_ITALIC));
        assert_eq!(pattern.get_strings(FC_FAMILY), vec!["Foo", "monospace"]);
    }

    #[test]
    fn test_interior_nul_rejected() {
        let description = FontDescription::new("Bad\0Name", 12.0);
        assert!(matches!(
            try_build_pattern(&description),
            Err(FontError::InvalidFamilyName { .. })
        ));
        assert!(build_pattern(&description).is_none());
    }

    #[test]
    fn test_missing_property_reads_as_none() {
        if !fontconfig_available() {
            return;
        }
        let pattern = Pattern::new().expect("pattern");
        assert_eq!(pattern.get_int(FC_SPACING, 0), None);
        assert!(pattern.get_string(FC_FAMILY, 0).is_none());
        assert!(!pattern.covers('A'));
    }

    #[test]
    fn test_empty_slots_equal_tombstones_never() {
        assert_eq!(PatternSlot::Empty, PatternSlot::Empty);
        assert_ne!(PatternSlot::Tombstone, PatternSlot::Tombstone);
        assert_ne!(PatternSlot::Tombstone, PatternSlot::Empty);
        assert_ne!(PatternSlot::Empty, PatternSlot::Tombstone);
    }

    #[test]
    fn test_clone_shares_native_pattern() {
        if !fontconfig_available() {
            return;
        }
        let pattern = Pattern::new().expect("pattern");
        let matched = MatchedPattern::new(pattern);
        let copy = matched.clone();
        assert!(matched.ptr_eq(&copy));
        assert_eq!(PatternSlot::Valid(matched), PatternSlot::Valid(copy));
    }

    #[test]
    fn test_duplicate_edits_stay_local() {
        if !fontconfig_available() {
            return;
        }
        let description = FontDescription::new("Foo", 12.0).with_generic(GenericFamily::None);
        let original = build_pattern(&description).expect("pattern");
        let mut copy = original.duplicate().expect("duplicate");
        assert_ne!(original.as_ptr(), copy.as_ptr());

        copy.add_string(FC_FAMILY, c"Bar").expect("add family");
        assert_eq!(copy.get_strings(FC_FAMILY), vec!["Foo", "Bar"]);
        assert_eq!(original.get_strings(FC_FAMILY), vec!["Foo"]);
    }

    #[test]
    fn test_matching_a_duplicate_leaves_query_untouched() {
        if !fontconfig_available() {
            return;
        }
        let description = FontDescription::new("Foo", 12.0).with_generic(GenericFamily::Monospace);
        let query = build_pattern(&description).expect("pattern");
        let before = query.unparse();

        let _ = match_pattern(query.duplicate().expect("duplicate"));

        assert_eq!(query.unparse(), before);
        assert_eq!(query.get_strings(FC_FAMILY), vec!["Foo", "monospace"]);
    }
}
