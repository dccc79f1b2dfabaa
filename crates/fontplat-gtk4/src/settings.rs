//! Rendering options taken from the GTK settings of the default display

use cairo::{Antialias, HintStyle, SubpixelOrder};
use fontplat_core::{FontOptionsSource, RenderingOptions};

/// Raw `gtk-xft-*` values. `-1` and `None` mean "not configured".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XftSettings {
    pub antialias: i32,
    pub hinting: i32,
    pub hint_style: Option<String>,
    pub rgba: Option<String>,
}

impl Default for XftSettings {
    fn default() -> Self {
        Self {
            antialias: -1,
            hinting: -1,
            hint_style: None,
            rgba: None,
        }
    }
}

impl XftSettings {
    pub fn from_settings(settings: &gtk4::Settings) -> Self {
        Self {
            antialias: settings.gtk_xft_antialias(),
            hinting: settings.gtk_xft_hinting(),
            hint_style: settings.gtk_xft_hintstyle().map(|s| s.to_string()),
            rgba: settings.gtk_xft_rgba().map(|s| s.to_string()),
        }
    }

    fn subpixel_order(&self) -> Option<SubpixelOrder> {
        match self.rgba.as_deref()? {
            "rgb" => Some(SubpixelOrder::Rgb),
            "bgr" => Some(SubpixelOrder::Bgr),
            "vrgb" => Some(SubpixelOrder::Vrgb),
            "vbgr" => Some(SubpixelOrder::Vbgr),
            _ => None,
        }
    }

    fn hint_style(&self) -> Option<HintStyle> {
        if self.hinting == 0 {
            return Some(HintStyle::None);
        }
        match self.hint_style.as_deref()? {
            "hintnone" => Some(HintStyle::None),
            "hintslight" => Some(HintStyle::Slight),
            "hintmedium" => Some(HintStyle::Medium),
            "hintfull" => Some(HintStyle::Full),
            _ => None,
        }
    }

    /// Options the display asks for, or `None` when it configures nothing.
    pub fn to_rendering(&self) -> Option<RenderingOptions> {
        let subpixel_order = self.subpixel_order();
        let hint_style = self.hint_style();
        let antialias = match self.antialias {
            0 => Some(Antialias::None),
            1 if subpixel_order.is_some() => Some(Antialias::Subpixel),
            1 => Some(Antialias::Gray),
            _ => None,
        };

        if antialias.is_none() && hint_style.is_none() && subpixel_order.is_none() {
            return None;
        }

        let mut rendering = RenderingOptions::new();
        if let Some(antialias) = antialias {
            rendering = rendering.with_antialias(antialias);
        }
        if let Some(hint_style) = hint_style {
            rendering = rendering.with_hint_style(hint_style);
        }
        if let Some(order) = subpixel_order {
            rendering = rendering.with_subpixel_order(order);
        }
        Some(rendering)
    }
}

/// [`FontOptionsSource`] reading the default `gtk4::Settings` on every query.
///
/// Must be queried from the GTK main thread. Before `gtk4::init` (or without
/// a display) it reports nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct GtkSettingsOptions;

impl GtkSettingsOptions {
    pub fn new() -> Self {
        GtkSettingsOptions
    }
}

impl FontOptionsSource for GtkSettingsOptions {
    fn current_font_options(&self) -> Option<cairo::FontOptions> {
        if !gtk4::is_initialized_main_thread() {
            return None;
        }
        let settings = gtk4::Settings::default()?;
        let rendering = XftSettings::from_settings(&settings).to_rendering()?;
        match rendering.to_font_options() {
            Ok(options) => Some(options),
            Err(e) => {
                tracing::warn!("Failed to build font options from GTK settings: {}", e);
                None
            }
        }
    }
}
