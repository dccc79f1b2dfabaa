//! Request-keyed cache of resolved fonts

use std::collections::{HashMap, VecDeque};

use crate::config::{RenderingOptions, ResolverConfig};
use crate::dummy_backend::StaticFontOptions;
use crate::font::{init, FallbackSet, FontDescription, FontPlatformData};
use crate::traits::{FontOptionsSource, NoAmbientOptions};

/// Cache of [`FontPlatformData`] keyed by the request that produced it.
///
/// Matching depends on the installed fonts, so entries are only valid for
/// one state of the font database; [`invalidate_if_changed`](Self::invalidate_if_changed)
/// drops everything when fontconfig reports a change. Failed resolutions are
/// cached too, as empty handles. When full, the oldest entry is evicted.
pub struct FontCache {
    config: ResolverConfig,
    options: Box<dyn FontOptionsSource>,
    entries: HashMap<FontDescription, FontPlatformData>,
    /// Insertion order, oldest first
    order: VecDeque<FontDescription>,
    hits: usize,
    misses: usize,
}

impl FontCache {
    /// Cache whose scaled fonts use `config.rendering`, or the process
    /// defaults when those are left at their defaults.
    pub fn new(config: ResolverConfig) -> Self {
        let options: Box<dyn FontOptionsSource> = if config.rendering == RenderingOptions::default() {
            Box::new(NoAmbientOptions)
        } else {
            Box::new(StaticFontOptions::new(config.rendering))
        };
        Self::with_options_source(config, options)
    }

    pub fn with_options_source(mut config: ResolverConfig, options: impl FontOptionsSource + 'static) -> Self {
        // The field is public, so the builder's lower bound can be bypassed.
        config.cache_capacity = config.cache_capacity.max(1);
        Self {
            config,
            options: Box::new(options),
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Resolved font for `description`, matching on first request.
    pub fn get_or_resolve(&mut self, description: &FontDescription) -> &FontPlatformData {
        if self.entries.contains_key(description) {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.evict_to(self.config.cache_capacity.saturating_sub(1));
            self.order.push_back(description.clone());
        }

        let options = self.options.as_ref();
        self.entries
            .entry(description.clone())
            .or_insert_with(|| FontPlatformData::new(description, Some(options)))
    }

    /// Already-resolved font, without matching.
    pub fn get(&self, description: &FontDescription) -> Option<&FontPlatformData> {
        self.entries.get(description)
    }

    /// Fallback candidates for the font resolved from `description`.
    pub fn fallbacks(&mut self, description: &FontDescription) -> Option<&FallbackSet> {
        self.get_or_resolve(description);
        let trim = self.config.trim_fallbacks;
        self.entries.get_mut(description)?.fallbacks_with(trim)
    }

    pub fn contains(&self, description: &FontDescription) -> bool {
        self.entries.contains_key(description)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Reload fontconfig if the installed fonts changed and, if so, drop
    /// every cached resolution. Returns whether the cache was cleared.
    pub fn invalidate_if_changed(&mut self) -> bool {
        if !init::rescan() {
            return false;
        }
        tracing::debug!("Dropping {} cached fonts after font configuration change", self.len());
        self.clear();
        true
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn evict_to(&mut self, max_len: usize) {
        while self.entries.len() > max_len {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
