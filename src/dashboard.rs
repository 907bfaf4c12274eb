//! The dashboard facade: wires every component to one document.
//!
//! On start the stored or system-derived preferences are applied and the
//! topic grid is listed. Everything after that is driven by the host:
//! user actions, viewport changes, export results and clock ticks.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::info;

use crate::catalog::{ContentCatalog, Topic, TopicSummary};
use crate::config::DashboardConfig;
use crate::export::{
    today_utc, AnalysisSnapshot, BusyGuard, ExportControl, ExportCoordinator, ExportError, ExportReport,
    ExportRequest,
};
use crate::i18n::{translate, Language, LocalizationApplier, TextKey};
use crate::notifications::{NotificationQueue, Severity};
use crate::preferences::{Preference, PreferenceStore};
use crate::resize::ResizeDispatcher;
use crate::theme::{Theme, ThemeApplier};
use crate::traits::{DocumentSurface, DownloadSink, ExportTransport, NotificationId, Resizable, Viewport};

/// Work done by one [`Dashboard::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub notification_transitions: usize,
    pub charts_resized: usize,
}

/// An export whose request is in flight; the control stays busy until it is completed
#[derive(Debug)]
pub struct PendingExport {
    pub request: ExportRequest,
    guard: BusyGuard,
}

pub struct Dashboard<S: DocumentSurface> {
    surface: S,
    preferences: PreferenceStore,
    active: Preference,
    notifications: NotificationQueue,
    catalog: ContentCatalog,
    resize: ResizeDispatcher,
    snapshot: Option<AnalysisSnapshot>,
    config: DashboardConfig,
    today: fn() -> NaiveDate,
}

impl<S: DocumentSurface + std::fmt::Debug> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("surface", &self.surface)
            .field("active", &self.active)
            .field("resize", &self.resize)
            .finish_non_exhaustive()
    }
}

impl<S: DocumentSurface> Dashboard<S> {
    pub fn new(surface: S, preferences: PreferenceStore, config: DashboardConfig) -> Self {
        let active = preferences.current();
        Self {
            surface,
            active,
            notifications: NotificationQueue::new(config.notifications),
            catalog: ContentCatalog::builtin(),
            resize: ResizeDispatcher::new(config.resize_debounce()),
            snapshot: None,
            preferences,
            config,
            today: today_utc,
        }
    }

    /// Replaces the topic catalog; takes effect on the next listing
    pub fn with_catalog(mut self, catalog: ContentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the clock used to date export file names
    pub fn with_date_source(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Resolves and applies preferences, then lists the topics
    pub fn start(&mut self) -> Vec<TopicSummary> {
        self.active = self.preferences.current();
        ThemeApplier::apply(&mut self.surface, self.active.theme);
        LocalizationApplier::apply(&mut self.surface, self.active.language);
        info!(
            theme = self.active.theme.token(),
            language = self.active.language.token(),
            durable = self.preferences.is_durable(),
            "dashboard started"
        );
        self.catalog.list_topics(&mut self.surface, self.active.language)
    }

    // ===== Preferences =====

    pub fn preference(&self) -> Preference {
        self.active
    }

    pub fn theme(&self) -> Theme {
        self.active.theme
    }

    pub fn language(&self) -> Language {
        self.active.language
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.preferences.toggle_theme();
        self.active.theme = theme;
        ThemeApplier::apply(&mut self.surface, theme);
        theme
    }

    /// Switches language and re-renders every localized surface
    pub fn toggle_language(&mut self) -> Language {
        let language = self.preferences.toggle_language();
        self.active.language = language;
        LocalizationApplier::apply(&mut self.surface, language);
        self.catalog.list_topics(&mut self.surface, language);
        if let Some(index) = self.catalog.selected() {
            self.catalog.select_topic(&mut self.surface, index, language);
        }
        language
    }

    /// Display string for `key` in the active language
    pub fn text(&self, key: TextKey) -> &'static str {
        translate(self.active.language, key)
    }

    // ===== Notifications =====

    pub fn notify(&mut self, message: &str, severity: Severity, now: Duration) -> NotificationId {
        self.notifications.notify(&mut self.surface, message, severity, now)
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    // ===== Sandbox =====

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn select_topic(&mut self, index: usize) -> Option<&Topic> {
        self.catalog.select_topic(&mut self.surface, index, self.active.language)
    }

    // ===== Charts =====

    /// Registers a chart to be resized after the viewport settles
    pub fn register_chart(&mut self, name: impl Into<String>, chart: Box<dyn Resizable>) -> Option<Box<dyn Resizable>> {
        self.resize.register(name, chart)
    }

    pub fn has_chart(&self, name: &str) -> bool {
        self.resize.contains(name)
    }

    pub fn on_viewport_resized(&mut self, now: Duration, viewport: Viewport) {
        self.resize.on_resize(now, viewport);
    }

    // ===== Clock =====

    /// Advances notifications and any settled resize
    pub fn tick(&mut self, now: Duration) -> TickSummary {
        TickSummary {
            notification_transitions: self.notifications.tick(&mut self.surface, now),
            charts_resized: self.resize.tick(now),
        }
    }

    /// Earliest moment at which [`Dashboard::tick`] has work to do
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.notifications.next_deadline(), self.resize.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ===== Export =====

    pub fn set_snapshot(&mut self, snapshot: Option<AnalysisSnapshot>) {
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> Option<&AnalysisSnapshot> {
        self.snapshot.as_ref()
    }

    /// Validates an export and marks `control` busy.
    ///
    /// A refused export emits its warning and returns `None`; the control
    /// is left untouched and no request is built. A control that is already
    /// exporting is refused the same way.
    pub fn begin_export(&mut self, format: &str, control: &ExportControl, now: Duration) -> Option<PendingExport> {
        match ExportCoordinator::begin(format, self.snapshot.as_ref(), control, self.active.language) {
            Ok((request, guard)) => Some(PendingExport { request, guard }),
            Err(rejection) => {
                self.notify(&rejection.notice.message, rejection.notice.severity, now);
                None
            }
        }
    }

    /// Delivers the result of a pending export, releases its control and
    /// emits exactly one notification
    pub fn complete_export(
        &mut self,
        pending: PendingExport,
        result: Result<Vec<u8>, ExportError>,
        sink: &mut dyn DownloadSink,
        now: Duration,
    ) -> ExportReport {
        let PendingExport { request, guard } = pending;
        let report = ExportCoordinator::finish(&request, result, sink, (self.today)(), self.active.language);
        drop(guard);
        self.notify(&report.notice.message, report.notice.severity, now);
        report
    }

    /// Runs a whole export on the calling thread
    pub fn export_blocking(
        &mut self,
        format: &str,
        control: &ExportControl,
        transport: &dyn ExportTransport,
        sink: &mut dyn DownloadSink,
        now: Duration,
    ) -> Option<ExportReport> {
        let pending = self.begin_export(format, control, now)?;
        let result = transport.request_export(&pending.request);
        Some(self.complete_export(pending, result, sink, now))
    }

    // ===== Access =====

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}
