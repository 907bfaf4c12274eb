//! Color mapping for palette variables, accents and notification severities.
//!
//! The palette comes from the style variables the dashboard wrote on the
//! document, so the window always shows what the document says.

use cryptodash::catalog::render::Accent;
use cryptodash::{hex_to_color32, with_alpha, MemoryDocument, PaletteVariable, Severity, Theme};
use egui::Color32;

pub const PRIMARY_COLOR: &str = "#3b82f6";
pub const INFO_COLOR: &str = "#06b6d4";
pub const SUCCESS_COLOR: &str = "#10b981";
pub const WARNING_COLOR: &str = "#f59e0b";
pub const DANGER_COLOR: &str = "#ef4444";

/// Palette of the current frame, resolved to egui colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentColors {
    pub background: Color32,
    pub card: Color32,
    pub sidebar: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub border: Color32,
}

impl DocumentColors {
    /// Reads the palette variables set on `doc`.
    ///
    /// A variable the document does not carry yet falls back to `theme`.
    pub fn from_document(doc: &MemoryDocument, theme: Theme) -> Self {
        let read = |variable: PaletteVariable| {
            let value = doc
                .style_property(variable.css_name())
                .unwrap_or_else(|| theme.palette().value(variable));
            hex_to_color32(value)
        };

        Self {
            background: read(PaletteVariable::BackgroundBase),
            card: read(PaletteVariable::CardBackground),
            sidebar: read(PaletteVariable::SidebarBackground),
            text_primary: read(PaletteVariable::TextPrimary),
            text_secondary: read(PaletteVariable::TextSecondary),
            border: read(PaletteVariable::BorderColor),
        }
    }
}

/// Color of an inline field value
pub fn accent_color(accent: Accent, colors: &DocumentColors) -> Color32 {
    match accent {
        Accent::Info => hex_to_color32(INFO_COLOR),
        Accent::Warning => hex_to_color32(WARNING_COLOR),
        Accent::Success => hex_to_color32(SUCCESS_COLOR),
        Accent::Primary => hex_to_color32(PRIMARY_COLOR),
        Accent::TextPrimary => colors.text_primary,
        Accent::TextSecondary => colors.text_secondary,
    }
}

/// Border color of a notification toast
pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Info => hex_to_color32(INFO_COLOR),
        Severity::Success => hex_to_color32(SUCCESS_COLOR),
        Severity::Error => hex_to_color32(DANGER_COLOR),
        Severity::Warning => hex_to_color32(WARNING_COLOR),
    }
}

/// Glyph standing in for the severity icon class
pub fn severity_glyph(severity: Severity) -> &'static str {
    match severity.icon() {
        "check-circle" => "✔",
        "exclamation-circle" => "✖",
        _ => "ℹ",
    }
}

/// Translucent fill of a callout block
pub fn callout_fill(tint: [u8; 3]) -> Color32 {
    with_alpha(Color32::from_rgb(tint[0], tint[1], tint[2]), 26)
}

/// Left border of a callout block
pub fn callout_stroke(tint: [u8; 3]) -> Color32 {
    Color32::from_rgb(tint[0], tint[1], tint[2])
}
