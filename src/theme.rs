//! Theme support module for the dashboard
//!
//! This module provides the two built-in palettes (light and dark) as named
//! style variables and applies them to a document in one pass.
//!
//! # Examples
//!
//! ```
//! use cryptodash::theme::{Theme, PaletteVariable};
//!
//! let palette = Theme::Dark.palette();
//! assert_eq!(palette.value(PaletteVariable::BackgroundBase), "#0f172a");
//! ```

use egui::Color32;
use tracing::debug;

use crate::traits::DocumentSurface;

/// Visual theme of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Token used in durable storage
    pub fn token(&self) -> &'static str {
        match self {
            Theme::Light => "claro",
            Theme::Dark => "oscuro",
        }
    }

    /// Parses a stored token; unknown tokens are treated as absent
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "claro" => Some(Theme::Light),
            "oscuro" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Complete palette for this theme
    pub fn palette(&self) -> &'static ThemePalette {
        match self {
            Theme::Light => &LIGHT_PALETTE,
            Theme::Dark => &DARK_PALETTE,
        }
    }
}

/// Named style variables set on the document root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteVariable {
    BackgroundBase,
    CardBackground,
    SidebarBackground,
    TextPrimary,
    TextSecondary,
    BorderColor,
}

impl PaletteVariable {
    pub const ALL: [PaletteVariable; 6] = [
        PaletteVariable::BackgroundBase,
        PaletteVariable::CardBackground,
        PaletteVariable::SidebarBackground,
        PaletteVariable::TextPrimary,
        PaletteVariable::TextSecondary,
        PaletteVariable::BorderColor,
    ];

    /// CSS custom property name
    pub fn css_name(&self) -> &'static str {
        match self {
            PaletteVariable::BackgroundBase => "--bg-dark",
            PaletteVariable::CardBackground => "--bg-card",
            PaletteVariable::SidebarBackground => "--bg-sidebar",
            PaletteVariable::TextPrimary => "--text-primary",
            PaletteVariable::TextSecondary => "--text-secondary",
            PaletteVariable::BorderColor => "--border-color",
        }
    }
}

/// Complete mapping from every palette variable to a color value
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    background_base: &'static str,
    card_background: &'static str,
    sidebar_background: &'static str,
    text_primary: &'static str,
    text_secondary: &'static str,
    border_color: &'static str,
}

impl ThemePalette {
    /// Returns the color assigned to `variable`
    pub fn value(&self, variable: PaletteVariable) -> &'static str {
        match variable {
            PaletteVariable::BackgroundBase => self.background_base,
            PaletteVariable::CardBackground => self.card_background,
            PaletteVariable::SidebarBackground => self.sidebar_background,
            PaletteVariable::TextPrimary => self.text_primary,
            PaletteVariable::TextSecondary => self.text_secondary,
            PaletteVariable::BorderColor => self.border_color,
        }
    }

    /// All (variable, value) pairs in declaration order
    pub fn entries(&self) -> [(PaletteVariable, &'static str); 6] {
        PaletteVariable::ALL.map(|variable| (variable, self.value(variable)))
    }

    /// Pairs of CSS property name and value, ready for a style batch
    pub fn css_properties(&self) -> Vec<(&'static str, &'static str)> {
        self.entries().iter().map(|(v, value)| (v.css_name(), *value)).collect()
    }
}

static DARK_PALETTE: ThemePalette = ThemePalette {
    background_base: "#0f172a",
    card_background: "#1e293b",
    sidebar_background: "#1e293b",
    text_primary: "#f1f5f9",
    text_secondary: "#94a3b8",
    border_color: "#334155",
};

static LIGHT_PALETTE: ThemePalette = ThemePalette {
    background_base: "#ffffff",
    card_background: "#f8fafc",
    sidebar_background: "#e2e8f0",
    text_primary: "#1e293b",
    text_secondary: "#64748b",
    border_color: "#cbd5e1",
};

/// Applies theme palettes to a document
pub struct ThemeApplier;

impl ThemeApplier {
    /// Sets all palette variables for `theme` on the document root in one batch
    pub fn apply(surface: &mut dyn DocumentSurface, theme: Theme) {
        let properties = theme.palette().css_properties();
        surface.set_style_properties(&properties);
        debug!(theme = theme.token(), "applied theme palette");
    }
}

/// Converts a hex color string (like "#0f172a") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
