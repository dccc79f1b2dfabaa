// src/error.rs
use thiserror::Error;

/// Reasons a font resolution step came back empty.
///
/// None of these escape the public constructors of
/// [`FontPlatformData`](crate::font::FontPlatformData); they are logged and
/// turned into the "no font" state. The `try_*` helpers expose them for
/// callers that want the reason.
#[derive(Error, Debug)]
pub enum FontError {
    // Font database errors
    #[error("fontconfig is not initialized")]
    NotInitialized,

    #[error("fontconfig failed to allocate a pattern")]
    PatternCreate,

    #[error("fontconfig rejected pattern value for `{object}`")]
    PatternAdd { object: &'static str },

    #[error("invalid family name: {name:?}")]
    InvalidFamilyName { name: String },

    #[error("no system font matched the request")]
    NoMatch,

    #[error("fontconfig failed to sort fallback fonts")]
    FallbackSort,

    // Cairo errors
    #[error("cairo failed to create a font face for the matched pattern")]
    FaceCreate,

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),
}

pub type FontResult<T> = Result<T, FontError>;
