use cairo::FontOptions;

/// Ambient rendering options supplied by the display environment.
///
/// The scaled-font factory asks this on every construction, so an
/// implementation may return different options as the display configuration
/// changes. Returning `None` means "nothing configured" and makes the factory
/// fall back to the process default options.
pub trait FontOptionsSource {
    fn current_font_options(&self) -> Option<FontOptions>;
}

/// Source for environments without a display.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAmbientOptions;

impl FontOptionsSource for NoAmbientOptions {
    fn current_font_options(&self) -> Option<FontOptions> {
        None
    }
}

impl<T: FontOptionsSource + ?Sized> FontOptionsSource for &T {
    fn current_font_options(&self) -> Option<FontOptions> {
        (**self).current_font_options()
    }
}

impl<T: FontOptionsSource + ?Sized> FontOptionsSource for Box<T> {
    fn current_font_options(&self) -> Option<FontOptions> {
        (**self).current_font_options()
    }
}
