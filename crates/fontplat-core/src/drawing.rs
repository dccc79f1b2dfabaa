// src/drawing.rs
use cairo::{FontFace, FontOptions, Matrix, ScaledFont};

use crate::error::{FontError, FontResult};
use crate::traits::FontOptionsSource;

thread_local! {
    // Created once per rendering thread and never mutated afterwards.
    static DEFAULT_FONT_OPTIONS: Option<FontOptions> = FontOptions::new().ok();
}

/// Uniform scale by `size` on both axes.
pub fn font_matrix(size: f64) -> Matrix {
    Matrix::new(size, 0.0, 0.0, size, 0.0, 0.0)
}

/// Copy of the thread default options used when the display has none.
pub fn default_font_options() -> Option<FontOptions> {
    DEFAULT_FONT_OPTIONS.with(|defaults| defaults.clone())
}

/// Bind `face` to `size` with an identity device transform.
///
/// Rendering options come from `ambient` when it reports any, otherwise from
/// the thread default options. The ambient source is consulted on every
/// call and its answer is never cached.
pub fn create_scaled_font(
    face: &FontFace,
    size: f64,
    ambient: Option<&dyn FontOptionsSource>,
) -> FontResult<ScaledFont> {
    let font_matrix = font_matrix(size);
    let ctm = Matrix::identity();

    if let Some(options) = ambient.and_then(|source| source.current_font_options()) {
        return Ok(ScaledFont::new(face, &font_matrix, &ctm, &options)?);
    }

    DEFAULT_FONT_OPTIONS.with(|defaults| match defaults {
        Some(options) => Ok(ScaledFont::new(face, &font_matrix, &ctm, options)?),
        None => Err(FontError::Cairo(cairo::Error::NoMemory)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderingOptions;
    use crate::dummy_backend::{StaticFontOptions, SwitchableFontOptions};
    use crate::traits::NoAmbientOptions;
    use cairo::{Antialias, FontSlant, FontWeight, HintStyle};

    fn toy_face() -> FontFace {
        FontFace::toy_create("monospace", FontSlant::Normal, FontWeight::Normal)
            .expect("toy font face")
    }

    #[test]
    fn test_font_matrix_is_uniform_scale() {
        let matrix = font_matrix(20.0);
        assert_eq!(matrix.xx(), 20.0);
        assert_eq!(matrix.yy(), 20.0);
        assert_eq!(matrix.xy(), 0.0);
        assert_eq!(matrix.yx(), 0.0);
        assert_eq!(matrix.x0(), 0.0);
        assert_eq!(matrix.y0(), 0.0);
    }

    #[test]
    fn test_scaled_font_uses_requested_size() {
        let font = create_scaled_font(&toy_face(), 14.0, None).expect("scaled font");
        assert_eq!(font.font_matrix().xx(), 14.0);
        assert_eq!(font.ctm().xx(), 1.0);
        assert_eq!(font.ctm().yy(), 1.0);
    }

    #[test]
    fn test_ambient_options_win() {
        let source = StaticFontOptions::new(RenderingOptions::new().with_antialias(Antialias::Gray));
        let font = create_scaled_font(&toy_face(), 12.0, Some(&source)).expect("scaled font");
        assert_eq!(font.font_options().expect("font options").antialias(), Antialias::Gray);
    }

    #[test]
    fn test_missing_ambient_options_fall_back_to_defaults() {
        let font = create_scaled_font(&toy_face(), 12.0, Some(&NoAmbientOptions)).expect("scaled font");
        let defaults = default_font_options().expect("default options");
        assert_eq!(font.font_options().expect("font options").antialias(), defaults.antialias());
        assert_eq!(font.font_options().expect("font options").hint_style(), defaults.hint_style());
    }

    #[test]
    fn test_ambient_source_consulted_per_call() {
        let source = SwitchableFontOptions::new(None);
        let face = toy_face();

        let first = create_scaled_font(&face, 12.0, Some(&source)).expect("scaled font");
        source.set(Some(RenderingOptions::new().with_hint_style(HintStyle::Slight)));
        let second = create_scaled_font(&face, 12.0, Some(&source)).expect("scaled font");

        assert_eq!(source.query_count(), 2);
        assert_ne!(first.font_options().expect("font options").hint_style(), HintStyle::Slight);
        assert_eq!(second.font_options().expect("font options").hint_style(), HintStyle::Slight);
    }
}
