use cryptodash::{
    debounce, ContainerId, ContentCatalog, Concept, ConceptField, Dashboard, DashboardConfig, DownloadSink,
    ExportControl, ExportError, ExportRequest, ExportTransport, Language, MemoryDocument, PaletteVariable, Phase,
    PreferenceStore, Severity, StaticSignals, TextKey, Theme, ThemeApplier, Topic, translate,
};
use cryptodash::export::AnalysisSnapshot;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ===== Test doubles =====

/// Storage whose contents survive the store that wrote them
#[derive(Clone, Default)]
struct SharedStorage {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl eframe::Storage for SharedStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.data.borrow_mut().insert(key.to_string(), value);
    }

    fn flush(&mut self) {}
}

struct ScriptedTransport {
    status: Option<u16>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    fn ok() -> Self {
        Self { status: None, calls: AtomicUsize::new(0) }
    }

    fn failing(status: u16) -> Self {
        Self { status: Some(status), calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExportTransport for ScriptedTransport {
    fn request_export(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.status {
            Some(status) => Err(ExportError::Status(status)),
            None => Ok(format!("payload:{}", request.format.extension()).into_bytes()),
        }
    }
}

#[derive(Default)]
struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        self.files.push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap_or_default()
}

fn dashboard_with(storage: Option<SharedStorage>, signals: StaticSignals) -> Dashboard<MemoryDocument> {
    let storage = storage.map(|s| Box::new(s) as Box<dyn eframe::Storage>);
    let prefs = PreferenceStore::new(storage, &signals);
    Dashboard::new(MemoryDocument::with_language_toggle(), prefs, DashboardConfig::default())
        .with_date_source(fixed_date)
}

fn dashboard() -> Dashboard<MemoryDocument> {
    dashboard_with(None, StaticSignals::default())
}

fn snapshot() -> AnalysisSnapshot {
    AnalysisSnapshot::from_value(serde_json::json!({
        "BTC": {"precio_actual": 64000.5, "decision": "COMPRA"},
        "ETH": {"precio_actual": 3100.0, "decision": "MANTENER"}
    }))
    .unwrap()
}

// ===== Themes and translations =====

#[test]
fn test_every_theme_sets_complete_distinct_palette() {
    let mut applied = Vec::new();
    for theme in Theme::ALL {
        let mut doc = MemoryDocument::new();
        ThemeApplier::apply(&mut doc, theme);

        assert_eq!(doc.style_batches(), 1);
        assert_eq!(doc.style_properties().len(), 6);
        for value in doc.style_properties().values() {
            assert!(!value.is_empty());
        }
        applied.push(doc);
    }

    for variable in [PaletteVariable::BackgroundBase, PaletteVariable::TextPrimary] {
        assert_ne!(
            applied[0].style_property(variable.css_name()),
            applied[1].style_property(variable.css_name())
        );
    }
}

#[test]
fn test_translation_tables_are_symmetric() {
    for key in TextKey::ALL {
        let es = translate(Language::Es, *key);
        let en = translate(Language::En, *key);
        assert!(!es.is_empty() && !en.is_empty(), "{} incomplete", key.name());
        assert_eq!(TextKey::from_name(key.name()), Some(*key));
    }
}

// ===== Preferences =====

#[test]
fn test_toggle_theme_twice_restores_preference() {
    let storage = SharedStorage::default();
    let mut dash = dashboard_with(Some(storage.clone()), StaticSignals::default());
    dash.start();
    let original = dash.theme();

    dash.toggle_theme();
    assert_ne!(dash.theme(), original);
    dash.toggle_theme();

    assert_eq!(dash.theme(), original);
    assert_eq!(storage.data.borrow().get("theme").map(String::as_str), Some(original.token()));
}

#[test]
fn test_system_defaults_are_not_persisted() {
    let storage = SharedStorage::default();
    let mut dash = dashboard_with(
        Some(storage.clone()),
        StaticSignals::new(true, Some("en-US".to_string())),
    );
    dash.start();

    assert_eq!(dash.theme(), Theme::Light);
    assert_eq!(dash.language(), Language::En);
    assert_eq!(dash.surface().title(), "Crypto Analyzer Pro");
    assert!(storage.data.borrow().is_empty());
}

#[test]
fn test_toggled_preferences_survive_restart() {
    let storage = SharedStorage::default();
    {
        let mut dash = dashboard_with(Some(storage.clone()), StaticSignals::default());
        dash.start();
        dash.toggle_language();
        dash.toggle_theme();
    }

    let mut dash = dashboard_with(Some(storage), StaticSignals::default());
    dash.start();
    assert_eq!(dash.language(), Language::En);
    assert_eq!(dash.theme(), Theme::Light);
    assert_eq!(
        dash.surface().style_property("--bg-dark"),
        Some(Theme::Light.palette().value(PaletteVariable::BackgroundBase))
    );
}

#[test]
fn test_missing_storage_keeps_toggles_in_memory() {
    let mut dash = dashboard();
    dash.start();
    assert!(!dash.preferences().is_durable());

    assert_eq!(dash.toggle_language(), Language::En);
    assert_eq!(dash.language(), Language::En);
    assert_eq!(dash.toggle_language(), Language::Es);
}

// ===== Notifications =====

#[test]
fn test_notification_completes_lifecycle_once() {
    let mut dash = dashboard();
    let id = dash.notify("X", Severity::Success, ms(0));
    assert_eq!(dash.surface().created_notifications(), 1);
    assert!(dash.surface().notification(id).is_some());

    let mut now = ms(0);
    while let Some(deadline) = dash.next_deadline() {
        now = deadline;
        dash.tick(now);
    }

    let doc = dash.surface();
    assert_eq!(doc.created_notifications(), 1);
    assert_eq!(doc.removed_notifications(), 1);
    assert!(doc.notification(id).is_none());
    assert_eq!(now, ms(3400));

    let retired = &dash.notifications().retired()[0];
    let phases: Vec<Phase> = retired.history.iter().map(|(phase, _)| *phase).collect();
    assert_eq!(phases, vec![Phase::Created, Phase::Shown, Phase::Hiding, Phase::Removed]);
    assert!(retired.history.windows(2).all(|pair| pair[0].1 <= pair[1].1));
}

#[test]
fn test_overlapping_notifications_are_independent() {
    let mut dash = dashboard();
    let first = dash.notify("uno", Severity::Info, ms(0));
    let second = dash.notify("dos", Severity::Error, ms(1000));

    dash.tick(ms(3400));
    assert!(dash.surface().notification(first).is_none());
    let node = dash.surface().notification(second).unwrap();
    assert!(node.has_class("show"));
    assert!(node.has_class("error"));

    dash.tick(ms(4400));
    assert!(dash.surface().notifications().is_empty());
    assert_eq!(dash.surface().removed_notifications(), 2);
}

// ===== Debounce =====

#[test]
fn test_debounce_burst_runs_once_with_last_arguments() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut debounced = debounce(move |value: u32| sink.borrow_mut().push(value), ms(250));

    for (i, at) in [0, 20, 40, 60, 80].into_iter().enumerate() {
        debounced.call(ms(at), i as u32 + 1);
        assert!(!debounced.poll(ms(at)));
    }

    assert!(!debounced.poll(ms(329)));
    assert!(debounced.poll(ms(330)));
    assert!(!debounced.poll(ms(1000)));
    assert_eq!(*calls.borrow(), vec![5]);
}

// ===== Sandbox =====

#[test]
fn test_select_topic_renders_every_concept_and_only_present_fields() {
    let topic = Topic {
        title: "Indicadores".to_string(),
        icon: "fas fa-chart-line".to_string(),
        accent_color: "#2196F3".to_string(),
        badge: "📊".to_string(),
        intro: "Intro".to_string(),
        concepts: vec![
            Concept::new("RSI", "fas fa-wave-square", "#4CAF50", "Oscilador de momento", "oscilador")
                .with(ConceptField::Formula, "RSI = 100 - 100 / (1 + RS)"),
            Concept::new("Soporte", "fas fa-layer-group", "#FF9800", "Nivel de precio", "tipo-desconocido")
                .with(ConceptField::Example, "BTC rebota en 60.000"),
        ],
    };
    let mut dash = dashboard().with_catalog(ContentCatalog::new(vec![topic]));
    dash.start();

    assert!(dash.select_topic(0).is_some());
    let doc = dash.surface();
    let html = doc.container_html(ContainerId::SandboxContent);

    assert_eq!(html.matches("tarjeta-concepto").count(), 2);
    assert_eq!(html.matches("field-formula").count(), 1);
    assert_eq!(html.matches("field-example").count(), 1);
    assert!(!html.contains("field-range"));
    assert!(html.contains("📌 Soporte"));
    assert!(doc.is_container_visible(ContainerId::SandboxContent));
    assert_eq!(doc.container(ContainerId::SandboxContent).map(|c| c.scroll_requests), Some(1));
}

#[test]
fn test_builtin_topics_render_every_card() {
    let mut dash = dashboard();
    let topics = dash.start();
    assert_eq!(topics.len(), dash.catalog().topics().len());

    for summary in topics {
        let expected = dash.catalog().topics()[summary.index].concepts.len();
        dash.select_topic(summary.index);
        let html = dash.surface().container_html(ContainerId::SandboxContent);
        assert_eq!(html.matches("tarjeta-concepto").count(), expected, "{}", summary.title);
    }
}

#[test]
fn test_out_of_range_topic_leaves_document_untouched() {
    let mut dash = dashboard();
    dash.start();
    let revision = dash.surface().revision();

    assert!(dash.select_topic(42).is_none());
    assert_eq!(dash.surface().revision(), revision);
}

// ===== Export =====

#[test]
fn test_export_without_data_warns_and_sends_nothing() {
    let mut dash = dashboard();
    let control = ExportControl::new("Exportar CSV");
    let before = control.state();
    let transport = ScriptedTransport::ok();
    let mut sink = MemorySink::default();

    let report = dash.export_blocking("csv", &control, &transport, &mut sink, ms(0));

    assert!(report.is_none());
    assert_eq!(transport.calls(), 0);
    assert_eq!(control.state(), before);
    assert!(sink.files.is_empty());
    let live = dash.notifications().live();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].severity, Severity::Warning);
}

#[test]
fn test_failed_export_restores_control_and_reports_once() {
    let mut dash = dashboard();
    dash.set_snapshot(Some(snapshot()));
    let control = ExportControl::new("Exportar PDF");
    let before = control.state();
    let transport = ScriptedTransport::failing(500);
    let mut sink = MemorySink::default();

    let report = dash.export_blocking("pdf", &control, &transport, &mut sink, ms(0)).unwrap();

    assert_eq!(transport.calls(), 1);
    assert!(report.delivered.is_none());
    assert_eq!(control.state(), before);
    assert!(sink.files.is_empty());
    let errors = dash
        .notifications()
        .live()
        .iter()
        .filter(|n| n.severity == Severity::Error)
        .count();
    assert_eq!(errors, 1);
    assert_eq!(dash.notifications().live().len(), 1);
}

#[test]
fn test_second_export_on_busy_control_is_refused() {
    let mut dash = dashboard();
    dash.set_snapshot(Some(snapshot()));
    let control = ExportControl::new("Exportar PDF");
    let before = control.state();
    let mut sink = MemorySink::default();

    let first = dash.begin_export("pdf", &control, ms(0)).unwrap();
    assert!(dash.begin_export("pdf", &control, ms(10)).is_none());
    let warnings: Vec<&str> = dash
        .notifications()
        .live()
        .iter()
        .filter(|n| n.severity == Severity::Warning)
        .map(|n| n.message.as_str())
        .collect();
    assert_eq!(warnings, vec!["Ya hay una exportación en curso"]);
    assert!(!control.is_enabled());

    dash.complete_export(first, Err(ExportError::Status(500)), &mut sink, ms(20));
    assert_eq!(control.state(), before);

    // The control is usable again once the first export settled
    let second = dash.begin_export("pdf", &control, ms(30)).unwrap();
    dash.complete_export(second, Err(ExportError::Status(500)), &mut sink, ms(40));
    assert_eq!(control.state(), before);
}

#[test]
fn test_successful_export_downloads_dated_file() {
    let mut dash = dashboard();
    dash.set_snapshot(Some(snapshot()));
    let control = ExportControl::new("Exportar JSON");
    let transport = ScriptedTransport::ok();
    let mut sink = MemorySink::default();

    let report = dash.export_blocking("json", &control, &transport, &mut sink, ms(0)).unwrap();

    assert_eq!(report.notice.severity, Severity::Success);
    assert_eq!(sink.files.len(), 1);
    assert_eq!(sink.files[0].0, "analisis_online_2024-05-17.json");
    assert_eq!(sink.files[0].1, b"payload:json");
    assert!(control.is_enabled());
    assert_eq!(control.label(), "Exportar JSON");
}

#[test]
fn test_unsupported_format_is_refused_before_io() {
    let mut dash = dashboard();
    dash.set_snapshot(Some(snapshot()));
    let control = ExportControl::new("Exportar");
    let transport = ScriptedTransport::ok();
    let mut sink = MemorySink::default();

    assert!(dash.export_blocking("xlsx", &control, &transport, &mut sink, ms(0)).is_none());
    assert_eq!(transport.calls(), 0);
    assert!(control.is_enabled());
    assert_eq!(dash.notifications().live()[0].severity, Severity::Warning);
}

#[test]
fn test_export_request_body_carries_rows() {
    let request = ExportRequest {
        format: cryptodash::ExportFormat::Csv,
        results: snapshot().rows(),
    };
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["formato"], "csv");
    assert_eq!(body["resultados"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["resultados"][0]["cripto"], "BTC");
}
