//! Status bar UI rendering
//!
//! Handles the bottom status bar: memory, loaded analysis and export activity.

use eframe::egui;
use egui::RichText;
use crate::app::AppState;
use crate::io::AsyncExporter;
use cryptodash::formatting::{format_memory_mb, get_current_memory_mb};
use cryptodash::TextKey;

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `exporter` - Background exporter, to show in-flight requests
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, exporter: &AsyncExporter) {
    let dashboard = &state.dashboard;

    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        let analysis = dashboard.text(TextKey::Analysis);
        match (dashboard.snapshot(), &state.snapshot_path) {
            (Some(snapshot), Some(path)) => {
                let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                ui.label(RichText::new(format!("{}: {} ({})", analysis, snapshot.len(), file_name)).strong());
            }
            (Some(snapshot), None) => {
                ui.label(RichText::new(format!("{}: {}", analysis, snapshot.len())).strong());
            }
            (None, _) => {
                ui.label(RichText::new(format!("{}: -", analysis)).strong());
            }
        }

        if exporter.is_busy() {
            ui.label(RichText::new("|").strong());
            ui.spinner();
            ui.label(dashboard.text(TextKey::Exporting));
        }

        if !dashboard.preferences().is_durable() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new("⚠ preferences are not saved").color(egui::Color32::YELLOW));
            });
        }
    });
}
