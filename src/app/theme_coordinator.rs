//! Theme application and preference persistence coordination.
//!
//! The dashboard writes its palette to the document; this coordinator turns
//! the document's style variables into egui visuals and copies the stored
//! preference tokens into eframe's storage.

use crate::app::AppState;
use crate::presentation::color_mapping::{DocumentColors, PRIMARY_COLOR};
use cryptodash::{hex_to_color32, with_alpha, MemoryDocument, PreferenceStore, Theme};

/// Coordinates theme application and persistence.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Whether the host reports a light color scheme
    pub fn system_prefers_light(ctx: &egui::Context) -> bool {
        ctx.system_theme() == Some(egui::Theme::Light)
    }

    /// Copies the stored preference tokens into persistent storage.
    ///
    /// Should be called every frame and during application shutdown.
    pub fn persist_preferences(storage: &mut dyn eframe::Storage, preferences: &PreferenceStore) {
        let entries = preferences.stored_entries();
        if entries.is_empty() {
            return;
        }
        for (key, value) in entries {
            storage.set_string(key, value);
        }
        storage.flush();
    }

    /// Applies the document's palette to the egui context.
    ///
    /// Called every frame to ensure theme is correctly applied.
    pub fn apply_document_theme(ctx: &egui::Context, state: &AppState) {
        let visuals = Self::visuals_for(state.dashboard.surface(), state.dashboard.theme());
        ctx.set_visuals(visuals);
    }

    pub fn visuals_for(doc: &MemoryDocument, theme: Theme) -> egui::Visuals {
        let colors = DocumentColors::from_document(doc, theme);
        let mut visuals = match theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        };

        visuals.panel_fill = colors.background;
        visuals.window_fill = colors.card;
        visuals.faint_bg_color = colors.card;
        visuals.extreme_bg_color = colors.sidebar;
        visuals.override_text_color = Some(colors.text_primary);
        visuals.window_stroke.color = colors.border;
        visuals.widgets.noninteractive.bg_stroke.color = colors.border;

        let primary = hex_to_color32(PRIMARY_COLOR);
        visuals.hyperlink_color = primary;
        visuals.selection.bg_fill = with_alpha(primary, 96);
        visuals
    }
}
