//! Header panel UI rendering
//!
//! Handles the top bar with the title, analysis loading, export buttons
//! and the theme and language toggles.

use eframe::egui;
use std::path::PathBuf;
use crate::app::AppState;
use crate::presentation::color_mapping::severity_color;
use cryptodash::{ExportFormat, Severity, TextKey, Theme};

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    ToggleTheme,
    ToggleLanguage,
    /// User picked an analysis file to export from
    OpenAnalysisRequested(PathBuf),
    /// User clicked one of the export buttons
    ExportRequested(ExportFormat),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;
    let dashboard = &state.dashboard;

    ui.horizontal(|ui| {
        ui.heading(dashboard.surface().title());
        ui.separator();

        if ui.button(format!("📂 {}", dashboard.text(TextKey::Analysis))).clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("JSON", &["json"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenAnalysisRequested(path));
            }
        }

        for (format, control) in &state.export_controls {
            let button = egui::Button::new(control.label());
            if ui.add_enabled(control.is_enabled(), button).clicked() {
                interaction = Some(HeaderInteraction::ExportRequested(*format));
            }
        }

        // Push toggles to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let language_button = ui
                .button(language_toggle_label(dashboard.surface().language_toggle()))
                .on_hover_text(dashboard.text(TextKey::LanguageLabel));
            if language_button.clicked() {
                interaction = Some(HeaderInteraction::ToggleLanguage);
            }

            let theme_label = match dashboard.theme() {
                Theme::Dark => format!("🌙 {}", dashboard.text(TextKey::DarkTheme)),
                Theme::Light => format!("☀ {}", dashboard.text(TextKey::LightTheme)),
            };
            let theme_button = ui
                .button(theme_label)
                .on_hover_text(dashboard.text(TextKey::ThemeLabel));
            if theme_button.clicked() {
                interaction = Some(HeaderInteraction::ToggleTheme);
            }
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(severity_color(Severity::Error), err);
    }

    interaction
}

/// Button text for the language toggle, from the flag icon the document shows
fn language_toggle_label(toggle_html: Option<&str>) -> &'static str {
    match toggle_html {
        Some(html) if html.contains("fa-flag-usa") => "🇺🇸 EN",
        Some(_) => "🇪🇸 ES",
        None => "🌐",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_toggle_label() {
        assert_eq!(language_toggle_label(Some(r#"<i class="fas fa-flag-usa"></i>"#)), "🇺🇸 EN");
        assert_eq!(language_toggle_label(Some(r#"<i class="fas fa-flag"></i>"#)), "🇪🇸 ES");
        assert_eq!(language_toggle_label(None), "🌐");
    }
}
