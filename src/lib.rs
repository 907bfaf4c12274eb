pub mod traits;
pub mod error;
pub mod config;
pub mod logging;
pub mod formatting;
pub mod preferences;
pub mod theme;
pub mod i18n;
pub mod scheduler;
pub mod notifications;
pub mod document;
pub mod catalog;
pub mod debounce;
pub mod resize;
pub mod export;
pub mod dashboard;

// Export traits
pub use traits::{
    ContainerId, DocumentSurface, DownloadSink, ExportTransport,
    NotificationId, Resizable, SystemSignals, Viewport
};

// Export preferences, theme and localization
pub use preferences::{MemoryStorage, Preference, PreferenceStore, StaticSignals, env_locale};
pub use theme::{Theme, ThemeApplier, ThemePalette, PaletteVariable, hex_to_color32, with_alpha};
pub use i18n::{Language, LocalizationApplier, TextKey, translate};

// Export notifications and scheduling
pub use scheduler::TimerQueue;
pub use notifications::{Notification, NotificationQueue, NotificationTimings, Phase, Severity};

// Export document model
pub use document::MemoryDocument;

// Export sandbox catalog
pub use catalog::{ContentCatalog, Concept, ConceptField, Topic, TopicSummary};

// Export resize handling
pub use debounce::{debounce, Debounced, Debouncer};
pub use resize::{ChartRegistry, ResizeDispatcher};

// Export data export
pub use export::{
    AnalysisSnapshot, BusyGuard, ExportControl, ExportCoordinator, ExportError,
    ExportFormat, ExportRequest, DirectoryDownloadSink, HttpExportTransport
};

// Export facade, config and errors
pub use dashboard::{Dashboard, PendingExport, TickSummary};
pub use config::DashboardConfig;
pub use error::DashboardError;
