//! Application-level coordination and workflow management.
//!
//! Handles the operations triggered from the window: preference toggles,
//! topic selection, loading an analysis and the export round trip.

use crate::app::AppState;
use crate::io::AsyncExporter;
use cryptodash::{AnalysisSnapshot, DownloadSink, ExportFormat, Severity, TextKey};
use std::path::PathBuf;
use tracing::{info, warn};

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Forwarding user actions to the dashboard
/// - Starting exports and collecting their results
/// - Driving the dashboard clock and scheduling repaints
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    pub fn toggle_theme(state: &mut AppState) {
        let theme = state.dashboard.toggle_theme();
        info!(theme = theme.token(), "theme toggled");
    }

    /// Switches language, then refreshes the topic list and the idle buttons.
    pub fn toggle_language(state: &mut AppState) {
        let language = state.dashboard.toggle_language();
        state.topics = state.dashboard.catalog().summaries(language);
        state.relabel_controls();
        info!(language = language.token(), "language toggled");
    }

    pub fn select_topic(state: &mut AppState, index: usize) {
        if state.dashboard.select_topic(index).is_none() {
            warn!(index, "ignoring selection of unknown topic");
        }
    }

    /// Loads an analysis result from disk and makes it the export source.
    pub fn open_analysis(state: &mut AppState, path: PathBuf) {
        let now = state.now();
        match AnalysisSnapshot::from_file(&path) {
            Ok(snapshot) => {
                info!(path = %path.display(), symbols = snapshot.len(), "analysis loaded");
                state.dashboard.set_snapshot(Some(snapshot));
                state.snapshot_path = Some(path);
                state.error_message = None;
                let message = state.dashboard.text(TextKey::DataUpdated);
                state.dashboard.notify(message, Severity::Success, now);
            }
            Err(e) => {
                warn!(path = %path.display(), "failed to load analysis: {:#}", e);
                let message = state.dashboard.text(TextKey::ErrorData);
                state.error_message = Some(format!("{}: {:#}", message, e));
                state.dashboard.notify(message, Severity::Error, now);
            }
        }
    }

    /// Validates an export and hands it to the background exporter.
    ///
    /// Refusals are notified by the dashboard and never reach the exporter.
    pub fn request_export(
        state: &mut AppState,
        exporter: &mut AsyncExporter,
        format: ExportFormat,
        ctx: &egui::Context,
    ) {
        let Some(control) = state.control(format).cloned() else {
            return;
        };
        let now = state.now();
        if let Some(pending) = state.dashboard.begin_export(format.extension(), &control, now) {
            if let Err(rejected) = exporter.start(pending, ctx) {
                warn!(format = format.extension(), "another export is still running");
                drop(rejected);
            }
        }
    }

    /// Collects a finished export and delivers it.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if an export completed (success or error).
    pub fn check_export_completion(
        state: &mut AppState,
        exporter: &mut AsyncExporter,
        sink: &mut dyn DownloadSink,
    ) -> bool {
        let Some((pending, result)) = exporter.check_completion() else {
            return false;
        };
        let now = state.now();
        let report = state.dashboard.complete_export(pending, result, sink, now);
        if let Some(path) = &report.delivered {
            info!(path = %path.display(), "export saved");
        }
        true
    }

    /// Advances notifications and resize handling to the current instant
    /// and asks for a repaint at the next deadline.
    pub fn advance_clock(state: &mut AppState, ctx: &egui::Context) {
        let now = state.now();
        state.dashboard.tick(now);
        if let Some(deadline) = state.dashboard.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_sub(now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LayoutSettings;
    use cryptodash::{
        Dashboard, DashboardConfig, ExportError, ExportRequest, ExportTransport, MemoryDocument, PreferenceStore,
        StaticSignals,
    };
    use std::path::Path;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct FixedTransport;

    impl ExportTransport for FixedTransport {
        fn request_export(&self, _request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
            Ok(b"cripto,decision\nBTC,COMPRA\n".to_vec())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        files: Vec<String>,
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&mut self, file_name: &str, _bytes: &[u8]) -> Result<PathBuf, ExportError> {
            self.files.push(file_name.to_string());
            Ok(PathBuf::from(file_name))
        }
    }

    fn state() -> AppState {
        let prefs = PreferenceStore::in_memory(&StaticSignals::default());
        let dashboard = Dashboard::new(MemoryDocument::with_language_toggle(), prefs, DashboardConfig::default());
        AppState::new(dashboard, LayoutSettings::default())
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cryptodash-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_toggle_language_refreshes_buttons() {
        let mut state = state();
        ApplicationCoordinator::toggle_language(&mut state);
        assert_eq!(state.control(ExportFormat::Json).unwrap().label(), "Export JSON");
        assert_eq!(state.topics[0].affordance, "Click to learn more");
    }

    #[test]
    fn test_open_analysis_sets_snapshot() {
        let mut state = state();
        let path = temp_file("analysis.json", r#"{"analisis": {"BTC": {"decision": "COMPRA"}}}"#);

        ApplicationCoordinator::open_analysis(&mut state, path.clone());

        assert_eq!(state.dashboard.snapshot().map(|s| s.len()), Some(1));
        assert_eq!(state.snapshot_path.as_deref(), Some(path.as_path()));
        assert_eq!(state.dashboard.notifications().live()[0].severity, Severity::Success);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_open_missing_analysis_reports_error() {
        let mut state = state();
        ApplicationCoordinator::open_analysis(&mut state, Path::new("/nonexistent/analysis.json").to_path_buf());

        assert!(state.dashboard.snapshot().is_none());
        assert!(state.error_message.is_some());
        assert_eq!(state.dashboard.notifications().live()[0].severity, Severity::Error);
    }

    #[test]
    fn test_export_without_analysis_never_starts() {
        let ctx = egui::Context::default();
        let mut state = state();
        let mut exporter = AsyncExporter::new(Arc::new(FixedTransport));

        ApplicationCoordinator::request_export(&mut state, &mut exporter, ExportFormat::Csv, &ctx);

        assert!(!exporter.is_busy());
        assert_eq!(state.dashboard.notifications().live()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_export_round_trip() {
        let ctx = egui::Context::default();
        let mut state = state();
        let path = temp_file("export.json", r#"{"ETH": {"decision": "VENTA"}}"#);
        ApplicationCoordinator::open_analysis(&mut state, path.clone());
        let mut exporter = AsyncExporter::new(Arc::new(FixedTransport));
        let mut sink = RecordingSink::default();

        ApplicationCoordinator::request_export(&mut state, &mut exporter, ExportFormat::Csv, &ctx);
        assert!(!state.control(ExportFormat::Csv).unwrap().is_enabled());

        let started = Instant::now();
        while !ApplicationCoordinator::check_export_completion(&mut state, &mut exporter, &mut sink) {
            assert!(started.elapsed() < Duration::from_secs(5), "export never completed");
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(state.control(ExportFormat::Csv).unwrap().is_enabled());
        assert_eq!(sink.files.len(), 1);
        assert!(sink.files[0].starts_with("analisis_online_"));
        let _ = std::fs::remove_file(path);
    }
}
