//! Export round trips against the analysis export endpoint.
//!
//! An export is split in three steps so hosts can run the network part
//! wherever they like:
//!
//! 1. [`ExportCoordinator::prepare`] checks the preconditions without any I/O
//! 2. the host holds a [`BusyGuard`] while an [`ExportTransport`] runs the request
//! 3. [`ExportCoordinator::finish`] delivers the payload and builds the notice
//!
//! [`ExportCoordinator::export`] runs all three synchronously.

pub mod download;
pub mod http;

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::i18n::{translate, Language, TextKey};
use crate::notifications::Severity;
use crate::traits::{DownloadSink, ExportTransport};

pub use download::DirectoryDownloadSink;
pub use http::HttpExportTransport;

/// Failures of the network or delivery side of an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("export endpoint answered with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("download failed: {0}")]
    Download(#[from] io::Error),

    #[error("export worker disconnected")]
    Disconnected,
}

/// Formats accepted by the export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Pdf, ExportFormat::Json];

    /// Parses a format name, ignoring case and surrounding whitespace
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "pdf" => Some(ExportFormat::Pdf),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    /// File extension, also the wire name
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
        }
    }

    /// Upper-case name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Json => "JSON",
        }
    }

    /// Translation key of the button that triggers this export
    pub fn button_key(&self) -> TextKey {
        match self {
            ExportFormat::Csv => TextKey::ExportCsv,
            ExportFormat::Pdf => TextKey::ExportPdf,
            ExportFormat::Json => TextKey::ExportJson,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

/// Body of one export request, serialized as the endpoint reads it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    #[serde(rename = "formato")]
    pub format: ExportFormat,
    #[serde(rename = "resultados")]
    pub results: Vec<Value>,
}

/// The current analysis result, keyed by symbol
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSnapshot {
    results: Map<String, Value>,
}

impl AnalysisSnapshot {
    pub fn new(results: Map<String, Value>) -> Self {
        Self { results }
    }

    /// Builds a snapshot from a JSON object of symbol → analysis.
    ///
    /// An object wrapping the map under `analisis` is unwrapped first.
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        let value = match value {
            Value::Object(mut map) if map.get("analisis").is_some_and(Value::is_object) => {
                map.remove("analisis").unwrap_or(Value::Null)
            }
            other => other,
        };
        match value {
            Value::Object(results) => Ok(Self::new(results)),
            other => anyhow::bail!("expected an object of analyses, found {}", json_kind(&other)),
        }
    }

    /// Loads a snapshot from a JSON file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read analysis file {}", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse analysis file {}", path.display()))?;
        Self::from_value(value)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    pub fn get(&self, symbol: &str) -> Option<&Value> {
        self.results.get(symbol)
    }

    /// One row per symbol: the analysis object with `cripto` set to the symbol
    pub fn rows(&self) -> Vec<Value> {
        self.results
            .iter()
            .map(|(symbol, analysis)| {
                let mut row = Map::new();
                row.insert("cripto".to_string(), Value::String(symbol.clone()));
                match analysis {
                    Value::Object(fields) => {
                        for (key, value) in fields {
                            if key != "cripto" {
                                row.insert(key.clone(), value.clone());
                            }
                        }
                    }
                    other => {
                        row.insert("valor".to_string(), other.clone());
                    }
                }
                Value::Object(row)
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Visible state of the control that triggers an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub label: String,
    pub enabled: bool,
}

/// Shared handle to an export control.
///
/// Clones refer to the same control; the UI reads it while a guard mutates it.
#[derive(Debug, Clone)]
pub struct ExportControl(Rc<RefCell<ControlState>>);

impl ExportControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(ControlState {
            label: label.into(),
            enabled: true,
        })))
    }

    pub fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    pub fn state(&self) -> ControlState {
        self.0.borrow().clone()
    }

    /// Relabels an idle control, e.g. after a language change.
    ///
    /// Ignored while the control is busy so the guard restores the label it captured.
    pub fn relabel(&self, label: impl Into<String>) {
        let mut state = self.0.borrow_mut();
        if state.enabled {
            state.label = label.into();
        }
    }
}

/// Busy state of an export control, released on drop.
///
/// Acquiring captures the idle state and shows the busy label. Dropping
/// restores the captured state on every exit path. A control holds at most
/// one guard at a time.
#[derive(Debug)]
pub struct BusyGuard {
    control: ExportControl,
    original: ControlState,
}

impl BusyGuard {
    /// Marks `control` busy; `None` if it already is
    pub fn acquire(control: &ExportControl, busy_label: &str) -> Option<Self> {
        let original = {
            let mut state = control.0.borrow_mut();
            if !state.enabled {
                return None;
            }
            let original = state.clone();
            state.enabled = false;
            state.label = busy_label.to_string();
            original
        };
        Some(Self {
            control: control.clone(),
            original,
        })
    }

    /// State the control returns to on release
    pub fn original(&self) -> &ControlState {
        &self.original
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        *self.control.0.borrow_mut() = self.original.clone();
    }
}

/// User-facing message produced by an export step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNotice {
    pub message: String,
    pub severity: Severity,
}

/// Why an export was refused before any I/O
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    NoData,
    UnsupportedFormat(String),
    /// The control already has an export in flight
    Busy,
}

/// A refused export and the warning to show for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRejection {
    pub reason: RejectionReason,
    pub notice: ExportNotice,
}

/// Result of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub notice: ExportNotice,
    /// Where the download landed, on success
    pub delivered: Option<PathBuf>,
}

/// Name of the downloaded file for an export made on `date`
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("analisis_online_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Today's date in UTC
pub fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Runs the export state machine; owns no state of its own
pub struct ExportCoordinator;

impl ExportCoordinator {
    /// Validates an export before any I/O or control change.
    ///
    /// Fails with a warning when there is no analysis to export or the
    /// format is not one the endpoint accepts.
    pub fn prepare(
        format: &str,
        snapshot: Option<&AnalysisSnapshot>,
        language: Language,
    ) -> Result<ExportRequest, ExportRejection> {
        let snapshot = match snapshot {
            Some(snapshot) if !snapshot.is_empty() => snapshot,
            _ => {
                warn!(format, "export refused: no analysis data");
                return Err(ExportRejection {
                    reason: RejectionReason::NoData,
                    notice: ExportNotice {
                        message: translate(language, TextKey::NoDataToExport).to_string(),
                        severity: Severity::Warning,
                    },
                });
            }
        };

        let parsed = match format.parse::<ExportFormat>() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "export refused");
                return Err(ExportRejection {
                    reason: RejectionReason::UnsupportedFormat(format.to_string()),
                    notice: ExportNotice {
                        message: format!("{}: {}", translate(language, TextKey::UnsupportedFormat), format),
                        severity: Severity::Warning,
                    },
                });
            }
        };

        Ok(ExportRequest {
            format: parsed,
            results: snapshot.rows(),
        })
    }

    /// Prepares a request and marks `control` busy for it.
    ///
    /// A control that is already busy is refused with a warning and left
    /// as it is, so the first export still restores it.
    pub fn begin(
        format: &str,
        snapshot: Option<&AnalysisSnapshot>,
        control: &ExportControl,
        language: Language,
    ) -> Result<(ExportRequest, BusyGuard), ExportRejection> {
        let request = Self::prepare(format, snapshot, language)?;
        match BusyGuard::acquire(control, translate(language, TextKey::Exporting)) {
            Some(guard) => Ok((request, guard)),
            None => {
                warn!(format, "export refused: control busy");
                Err(ExportRejection {
                    reason: RejectionReason::Busy,
                    notice: ExportNotice {
                        message: translate(language, TextKey::ExportInProgress).to_string(),
                        severity: Severity::Warning,
                    },
                })
            }
        }
    }

    /// Turns a transport result into a delivered download and its notice
    pub fn finish(
        request: &ExportRequest,
        result: Result<Vec<u8>, ExportError>,
        sink: &mut dyn DownloadSink,
        date: NaiveDate,
        language: Language,
    ) -> ExportReport {
        let delivered = result.and_then(|bytes| {
            let file_name = export_file_name(request.format, date);
            sink.deliver(&file_name, &bytes)
        });

        match delivered {
            Ok(path) => {
                info!(format = request.format.extension(), path = %path.display(), "export delivered");
                ExportReport {
                    notice: ExportNotice {
                        message: translate(language, TextKey::ExportCompleted)
                            .replace("{format}", request.format.label()),
                        severity: Severity::Success,
                    },
                    delivered: Some(path),
                }
            }
            Err(e) => {
                warn!(format = request.format.extension(), error = %e, "export failed");
                ExportReport {
                    notice: ExportNotice {
                        message: translate(language, TextKey::ExportFailed).to_string(),
                        severity: Severity::Error,
                    },
                    delivered: None,
                }
            }
        }
    }

    /// Runs a whole export synchronously.
    ///
    /// The control is busy for the duration of the request and restored
    /// before this returns, whatever the outcome.
    pub fn export(
        format: &str,
        snapshot: Option<&AnalysisSnapshot>,
        control: &ExportControl,
        transport: &dyn ExportTransport,
        sink: &mut dyn DownloadSink,
        date: NaiveDate,
        language: Language,
    ) -> Result<ExportReport, ExportRejection> {
        let (request, _busy) = Self::begin(format, snapshot, control, language)?;
        let result = transport.request_export(&request);
        Ok(Self::finish(&request, result, sink, date, language))
    }
}
