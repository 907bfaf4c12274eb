//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, topics, sandbox content, status, toasts)
//! and manages their layout and interaction coordination.

use std::path::PathBuf;

use crate::app::AppState;
use crate::io::AsyncExporter;
use crate::ui::{header, sandbox_panel, status_bar, toasts};
use cryptodash::{ExportFormat, TextKey};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    ToggleTheme,
    ToggleLanguage,
    /// User picked an analysis file
    OpenAnalysisRequested(PathBuf),
    /// User clicked an export button
    ExportRequested(ExportFormat),
    /// User clicked a topic in the sandbox list
    TopicSelected(usize),
}

impl From<header::HeaderInteraction> for PanelInteraction {
    fn from(interaction: header::HeaderInteraction) -> Self {
        match interaction {
            header::HeaderInteraction::ToggleTheme => PanelInteraction::ToggleTheme,
            header::HeaderInteraction::ToggleLanguage => PanelInteraction::ToggleLanguage,
            header::HeaderInteraction::OpenAnalysisRequested(path) => PanelInteraction::OpenAnalysisRequested(path),
            header::HeaderInteraction::ExportRequested(format) => PanelInteraction::ExportRequested(format),
        }
    }
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        exporter: &AsyncExporter,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(header_interaction.into());
            }
        });

        // Status panel at the very bottom
        if state.layout.show_status_bar {
            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                status_bar::render_status_bar(ui, state, exporter);
            });
        }

        // Left panel: topic list
        let topics_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(6))
            .fill(ctx.style().visuals.extreme_bg_color);

        let topics_panel = egui::SidePanel::left("topics_panel")
            .default_width(state.layout.topics_width)
            .resizable(true)
            .frame(topics_frame)
            .show(ctx, |ui| {
                ui.heading(state.dashboard.text(TextKey::Sandbox));
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(sandbox_panel::SandboxInteraction::TopicSelected(index)) =
                        sandbox_panel::render_topics(ui, state)
                    {
                        interaction = Some(PanelInteraction::TopicSelected(index));
                    }
                });
            });
        state.layout.topics_width = topics_panel.response.rect.width();

        // Central panel: selected topic
        let content_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(content_frame)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        sandbox_panel::render_topic_content(ui, state);
                    });
            });

        // Toasts float above everything
        toasts::render_toasts(ctx, state);

        interaction
    }
}
