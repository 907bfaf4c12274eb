//! Crypto dashboard GUI application
//!
//! Desktop host for the dashboard core using the egui framework.
//! The window features:
//! - Light and dark themes driven by the document's palette variables
//! - Spanish and English text with persistent preferences
//! - The educational sandbox with responsive concept card grids
//! - Analysis export to CSV, PDF or JSON through the export endpoint
//! - Notification toasts with timed show and hide phases

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `presentation/` - Visual styling and color mapping
//! - `io/` - Background export requests
//! - `ui/` - UI panel rendering and interaction

use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

mod presentation;
mod io;
mod app;
mod ui;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use cryptodash::{
    env_locale, Dashboard, DashboardConfig, DirectoryDownloadSink, HttpExportTransport, MemoryDocument,
    MemoryStorage, PreferenceStore, StaticSignals, Viewport,
};
use io::AsyncExporter;
use tracing::{error, info};
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the dashboard window.
fn main() -> eframe::Result {
    cryptodash::logging::init();

    // Optional analysis file to load on startup
    let initial_analysis = std::env::args().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Cripto Analizador Pro"),
        ..Default::default()
    };

    eframe::run_native(
        "cryptodash",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, initial_analysis)))),
    )
}

/// The dashboard window.
///
/// Most functionality is delegated to coordinators:
/// - `ApplicationCoordinator` handles user actions, exports and the clock
/// - `ThemeCoordinator` handles visuals and preference persistence
/// - `PanelManager` handles UI panel layout and rendering
struct DashboardApp {
    /// Centralized application state
    state: AppState,
    /// Background export requests
    exporter: AsyncExporter,
    /// Where finished exports are saved
    sink: DirectoryDownloadSink,
    /// Optional analysis to load on first frame
    pending_analysis: Option<PathBuf>,
}

impl DashboardApp {
    /// Creates the window state with preferences and layout loaded from persistent storage.
    fn new(cc: &eframe::CreationContext, config: DashboardConfig, initial_analysis: Option<PathBuf>) -> Self {
        let signals = StaticSignals::new(ThemeCoordinator::system_prefers_light(&cc.egui_ctx), env_locale());

        // Without eframe persistence the preferences live in memory only
        let storage = cc
            .storage
            .map(|storage| Box::new(MemoryStorage::seeded_from(Some(storage))) as Box<dyn eframe::Storage>);
        let preferences = PreferenceStore::new(storage, &signals);

        let layout = SettingsCoordinator::load_layout(cc.storage);
        let sink = DirectoryDownloadSink::with_override(config.download_dir.as_deref());
        let exporter = match HttpExportTransport::from_config(&config) {
            Ok(transport) => AsyncExporter::new(Arc::new(transport)),
            Err(e) => {
                error!("export disabled: {}", e);
                AsyncExporter::unavailable(e.to_string())
            }
        };
        info!(endpoint = %config.export_url(), downloads = %sink.dir().display(), "dashboard window ready");

        let dashboard = Dashboard::new(MemoryDocument::with_language_toggle(), preferences, config);

        Self {
            state: AppState::new(dashboard, layout),
            exporter,
            sink,
            pending_analysis: initial_analysis,
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::ToggleTheme => {
                ApplicationCoordinator::toggle_theme(&mut self.state);
            }
            PanelInteraction::ToggleLanguage => {
                ApplicationCoordinator::toggle_language(&mut self.state);
            }
            PanelInteraction::OpenAnalysisRequested(path) => {
                ApplicationCoordinator::open_analysis(&mut self.state, path);
            }
            PanelInteraction::ExportRequested(format) => {
                ApplicationCoordinator::request_export(&mut self.state, &mut self.exporter, format, ctx);
            }
            PanelInteraction::TopicSelected(index) => {
                ApplicationCoordinator::select_topic(&mut self.state, index);
            }
        }
        ctx.request_repaint();
    }
}

impl eframe::App for DashboardApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::persist_preferences(storage, self.state.dashboard.preferences());
        SettingsCoordinator::save_layout(storage, &self.state.layout);
    }

    /// Main update loop.
    ///
    /// 1. Collect a finished export
    /// 2. Report the viewport size and advance the clock
    /// 3. Apply the document's theme
    /// 4. Load the analysis given on the command line
    /// 5. Render all panels and handle their interactions
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_export_completion(&mut self.state, &mut self.exporter, &mut self.sink);

        let size = ctx.content_rect().size();
        self.state.observe_viewport(Viewport::new(size.x, size.y));
        ApplicationCoordinator::advance_clock(&mut self.state, ctx);

        ThemeCoordinator::apply_document_theme(ctx, &self.state);

        // Persist preferences during frame (for crash resilience)
        if let Some(storage) = frame.storage_mut() {
            ThemeCoordinator::persist_preferences(storage, self.state.dashboard.preferences());
            SettingsCoordinator::save_layout(storage, &self.state.layout);
        }

        if let Some(path) = self.pending_analysis.take() {
            ApplicationCoordinator::open_analysis(&mut self.state, path);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.exporter) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
