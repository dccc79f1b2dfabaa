//! Headless rendering-options sources for tests and tools without a display

use std::cell::{Cell, RefCell};

use cairo::FontOptions;

use crate::config::RenderingOptions;
use crate::traits::FontOptionsSource;

/// Source that always reports the same configured options.
#[derive(Clone, Debug, Default)]
pub struct StaticFontOptions {
    rendering: RenderingOptions,
}

impl StaticFontOptions {
    pub fn new(rendering: RenderingOptions) -> Self {
        StaticFontOptions { rendering }
    }

    pub fn rendering(&self) -> RenderingOptions {
        self.rendering
    }
}

impl FontOptionsSource for StaticFontOptions {
    fn current_font_options(&self) -> Option<FontOptions> {
        match self.rendering.to_font_options() {
            Ok(options) => Some(options),
            Err(e) => {
                tracing::warn!("Failed to build static font options: {}", e);
                None
            }
        }
    }
}

/// Source whose options can be swapped at runtime, mimicking a display whose
/// settings change. Counts how often it was queried.
#[derive(Debug, Default)]
pub struct SwitchableFontOptions {
    current: RefCell<Option<RenderingOptions>>,
    queries: Cell<usize>,
}

impl SwitchableFontOptions {
    pub fn new(current: Option<RenderingOptions>) -> Self {
        SwitchableFontOptions {
            current: RefCell::new(current),
            queries: Cell::new(0),
        }
    }

    pub fn set(&self, rendering: Option<RenderingOptions>) {
        *self.current.borrow_mut() = rendering;
    }

    pub fn query_count(&self) -> usize {
        self.queries.get()
    }
}

impl FontOptionsSource for SwitchableFontOptions {
    fn current_font_options(&self) -> Option<FontOptions> {
        self.queries.set(self.queries.get() + 1);
        let rendering = (*self.current.borrow())?;
        rendering.to_font_options().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Antialias, HintStyle};

    #[test]
    fn test_static_options() {
        let source = StaticFontOptions::new(RenderingOptions::new().with_antialias(Antialias::None));
        let options = source.current_font_options().expect("options");
        assert_eq!(options.antialias(), Antialias::None);
    }

    #[test]
    fn test_switchable_options() {
        let source = SwitchableFontOptions::new(None);
        assert!(source.current_font_options().is_none());

        source.set(Some(RenderingOptions::new().with_hint_style(HintStyle::Full)));
        let options = source.current_font_options().expect("options");
        assert_eq!(options.hint_style(), HintStyle::Full);
        assert_eq!(source.query_count(), 2);
    }
}
