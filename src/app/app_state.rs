//! Centralized application state for the dashboard window.
//!
//! The dashboard owns the document and every component that writes to it;
//! this state adds what only the window needs: export buttons, layout,
//! the card grid and the host clock.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use cryptodash::{
    Dashboard, ExportControl, ExportFormat, MemoryDocument, Resizable, Topic, TopicSummary, Viewport,
};
use serde::{Deserialize, Serialize};

/// Registry name of the sandbox card grid
pub const SANDBOX_GRID: &str = "sandbox-grid";

/// Narrowest concept card before the grid drops a column
pub const MIN_CARD_WIDTH: f32 = 320.0;

pub const MAX_CARD_COLUMNS: usize = 4;

/// Column count of the concept card grid.
///
/// Clones share the count: one is registered with the dashboard and
/// recomputed after the viewport settles, the other is read while painting.
#[derive(Debug, Clone)]
pub struct CardGrid {
    columns: Rc<Cell<usize>>,
}

impl Default for CardGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CardGrid {
    pub fn new() -> Self {
        Self {
            columns: Rc::new(Cell::new(1)),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns.get()
    }

    pub fn columns_for(width: f32) -> usize {
        ((width / MIN_CARD_WIDTH).floor() as usize).clamp(1, MAX_CARD_COLUMNS)
    }
}

impl Resizable for CardGrid {
    fn resize(&mut self, viewport: Viewport) {
        self.columns.set(Self::columns_for(viewport.width));
    }
}

/// Window layout persisted between sessions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub topics_width: f32,
    pub show_status_bar: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            topics_width: 260.0,
            show_status_bar: true,
        }
    }
}

/// Main application state.
pub struct AppState {
    // ===== Dashboard =====
    /// Document, preferences, notifications, catalog and export flow
    pub dashboard: Dashboard<MemoryDocument>,

    /// Topic grid as last listed
    pub topics: Vec<TopicSummary>,

    // ===== Window =====
    /// One button per export format
    pub export_controls: Vec<(ExportFormat, ExportControl)>,

    pub grid: CardGrid,

    pub layout: LayoutSettings,

    /// File the current analysis was loaded from
    pub snapshot_path: Option<PathBuf>,

    /// Current error message to display (if any)
    pub error_message: Option<String>,

    /// Scroll requests on the sandbox content already honored
    pub seen_scroll_requests: usize,

    clock_origin: Instant,
    last_viewport: Option<Viewport>,
}

impl AppState {
    /// Starts the dashboard and registers the card grid with it.
    pub fn new(mut dashboard: Dashboard<MemoryDocument>, layout: LayoutSettings) -> Self {
        let topics = dashboard.start();

        let grid = CardGrid::new();
        dashboard.register_chart(SANDBOX_GRID, Box::new(grid.clone()));

        let export_controls = ExportFormat::ALL
            .iter()
            .map(|format| (*format, ExportControl::new(dashboard.text(format.button_key()))))
            .collect();

        Self {
            dashboard,
            topics,
            export_controls,
            grid,
            layout,
            snapshot_path: None,
            error_message: None,
            seen_scroll_requests: 0,
            clock_origin: Instant::now(),
            last_viewport: None,
        }
    }

    /// Time since the window opened
    pub fn now(&self) -> Duration {
        self.clock_origin.elapsed()
    }

    pub fn control(&self, format: ExportFormat) -> Option<&ExportControl> {
        self.export_controls
            .iter()
            .find(|(candidate, _)| *candidate == format)
            .map(|(_, control)| control)
    }

    /// Relabels idle export buttons in the active language
    pub fn relabel_controls(&self) {
        for (format, control) in &self.export_controls {
            control.relabel(self.dashboard.text(format.button_key()));
        }
    }

    /// Forwards a viewport change to the dashboard.
    ///
    /// Returns false when the size is the one already reported.
    pub fn observe_viewport(&mut self, viewport: Viewport) -> bool {
        if self.last_viewport == Some(viewport) {
            return false;
        }
        self.last_viewport = Some(viewport);
        let now = self.now();
        self.dashboard.on_viewport_resized(now, viewport);
        true
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        let catalog = self.dashboard.catalog();
        catalog.selected().and_then(|index| catalog.topic(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptodash::{DashboardConfig, PreferenceStore, StaticSignals};

    fn state() -> AppState {
        let prefs = PreferenceStore::in_memory(&StaticSignals::default());
        let dashboard = Dashboard::new(MemoryDocument::with_language_toggle(), prefs, DashboardConfig::default());
        AppState::new(dashboard, LayoutSettings::default())
    }

    #[test]
    fn test_columns_for_width() {
        assert_eq!(CardGrid::columns_for(100.0), 1);
        assert_eq!(CardGrid::columns_for(700.0), 2);
        assert_eq!(CardGrid::columns_for(5000.0), MAX_CARD_COLUMNS);
    }

    #[test]
    fn test_new_state_lists_topics_and_registers_grid() {
        let mut state = state();
        assert_eq!(state.topics.len(), 4);
        assert_eq!(state.export_controls.len(), 3);
        assert_eq!(state.control(ExportFormat::Pdf).unwrap().label(), "Exportar PDF");
        assert!(state.dashboard.has_chart(SANDBOX_GRID));
    }

    #[test]
    fn test_grid_resizes_after_viewport_settles() {
        let mut state = state();
        assert!(state.observe_viewport(Viewport::new(1000.0, 700.0)));
        assert!(!state.observe_viewport(Viewport::new(1000.0, 700.0)));
        assert_eq!(state.grid.columns(), 1);

        let later = state.now() + Duration::from_secs(1);
        state.dashboard.tick(later);
        assert_eq!(state.grid.columns(), 3);
    }

    #[test]
    fn test_relabel_follows_language() {
        let mut state = state();
        state.dashboard.toggle_language();
        state.relabel_controls();
        assert_eq!(state.control(ExportFormat::Csv).unwrap().label(), "Export CSV");
    }
}
