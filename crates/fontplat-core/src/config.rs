// src/config.rs
use cairo::{Antialias, FontOptions, HintMetrics, HintStyle, SubpixelOrder};

use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::error::FontResult;

/// Hinting and antialiasing choices handed to cairo when a scaled font is built.
///
/// Every field defaults to cairo's own `Default` variant, which lets the
/// backend (and fontconfig's per-font settings) decide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderingOptions {
    pub antialias: Antialias,
    pub hint_style: HintStyle,
    pub hint_metrics: HintMetrics,
    pub subpixel_order: SubpixelOrder,
}

impl Default for RenderingOptions {
    fn default() -> Self {
        Self {
            antialias: Antialias::Default,
            hint_style: HintStyle::Default,
            hint_metrics: HintMetrics::Default,
            subpixel_order: SubpixelOrder::Default,
        }
    }
}

impl RenderingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_antialias(mut self, antialias: Antialias) -> Self {
        self.antialias = antialias;
        self
    }

    pub fn with_hint_style(mut self, hint_style: HintStyle) -> Self {
        self.hint_style = hint_style;
        self
    }

    pub fn with_hint_metrics(mut self, hint_metrics: HintMetrics) -> Self {
        self.hint_metrics = hint_metrics;
        self
    }

    pub fn with_subpixel_order(mut self, subpixel_order: SubpixelOrder) -> Self {
        self.subpixel_order = subpixel_order;
        self
    }

    /// Build a fresh cairo options object carrying these settings.
    pub fn to_font_options(&self) -> FontResult<FontOptions> {
        let mut options = FontOptions::new()?;
        options.set_antialias(self.antialias);
        options.set_hint_style(self.hint_style);
        options.set_hint_metrics(self.hint_metrics);
        options.set_subpixel_order(self.subpixel_order);
        Ok(options)
    }
}

#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Family used by callers that need a request before style resolution ran.
    pub default_family: String,
    pub default_size: f64,
    /// Upper bound on entries held by a [`FontCache`](crate::font::FontCache).
    pub cache_capacity: usize,
    /// Drop fallback candidates that add no new glyph coverage.
    pub trim_fallbacks: bool,
    pub rendering: RenderingOptions,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_family: DEFAULT_FONT_FAMILY.to_string(),
            default_size: DEFAULT_FONT_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            trim_fallbacks: true,
            rendering: RenderingOptions::default(),
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_family(mut self, family: &str) -> Self {
        self.default_family = family.to_string();
        self
    }

    pub fn with_default_size(mut self, size: f64) -> Self {
        self.default_size = size;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity.max(1);
        self
    }

    pub fn with_trim_fallbacks(mut self, trim: bool) -> Self {
        self.trim_fallbacks = trim;
        self
    }

    pub fn with_rendering(mut self, rendering: RenderingOptions) -> Self {
        self.rendering = rendering;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.default_family, DEFAULT_FONT_FAMILY);
        assert_eq!(config.default_size, DEFAULT_FONT_SIZE);
        assert!(config.trim_fallbacks);
        assert_eq!(config.rendering, RenderingOptions::default());
    }

    #[test]
    fn test_cache_capacity_never_zero() {
        let config = ResolverConfig::new().with_cache_capacity(0);
        assert_eq!(config.cache_capacity, 1);
    }

    #[test]
    fn test_rendering_options_round_into_cairo() {
        let rendering = RenderingOptions::new()
            .with_antialias(Antialias::Gray)
            .with_hint_style(HintStyle::Medium)
            .with_hint_metrics(HintMetrics::On);

        let options = rendering.to_font_options().expect("cairo font options");
        assert_eq!(options.antialias(), Antialias::Gray);
        assert_eq!(options.hint_style(), HintStyle::Medium);
        assert_eq!(options.hint_metrics(), HintMetrics::On);
        assert_eq!(options.subpixel_order(), SubpixelOrder::Default);
    }
}
