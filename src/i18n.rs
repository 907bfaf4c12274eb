//! Display language and the static translation table.
//!
//! Every key is declared once with both translations, so a language missing
//! a key does not compile. Other surfaces read the table directly through
//! [`translate`] or by key name through [`TextKey::from_name`].

use tracing::debug;

use crate::traits::DocumentSurface;

/// Active display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Es,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    /// Token used in durable storage
    pub fn token(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Parses a stored token; unknown tokens are treated as absent
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Resolves a host language tag: `en*` selects English, anything else Spanish
    pub fn from_locale(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::Es
        }
    }

    /// The other language
    pub fn toggled(&self) -> Self {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }
}

macro_rules! text_keys {
    ($($variant:ident => $name:literal { es: $es:literal, en: $en:literal })*) => {
        /// Closed set of translation keys
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TextKey {
            $($variant,)*
        }

        impl TextKey {
            pub const ALL: &'static [TextKey] = &[$(TextKey::$variant,)*];

            /// Key name as used by page markup
            pub fn name(&self) -> &'static str {
                match self {
                    $(TextKey::$variant => $name,)*
                }
            }

            /// Looks a key up by its name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(TextKey::$variant),)*
                    _ => None,
                }
            }
        }

        /// Returns the display string for `key` in `language`
        pub fn translate(language: Language, key: TextKey) -> &'static str {
            match (language, key) {
                $(
                    (Language::Es, TextKey::$variant) => $es,
                    (Language::En, TextKey::$variant) => $en,
                )*
            }
        }
    };
}

text_keys! {
    Title => "title" { es: "Cripto Analizador Pro", en: "Crypto Analyzer Pro" }
    OnlineMode => "onlineMode" { es: "Modo Online", en: "Online Mode" }
    OfflineMode => "offlineMode" { es: "Modo Offline", en: "Offline Mode" }
    Dashboard => "dashboard" { es: "Dashboard", en: "Dashboard" }
    Charts => "charts" { es: "Gráficos", en: "Charts" }
    Analysis => "analysis" { es: "Análisis", en: "Analysis" }
    Alerts => "alerts" { es: "Alertas", en: "Alerts" }
    Sentiment => "sentiment" { es: "Sentimiento", en: "Sentiment" }
    AiExplanation => "aiExplanation" { es: "IA Explicativa", en: "AI Explanation" }
    Correlation => "correlation" { es: "Correlación", en: "Correlation" }
    Backtesting => "backtesting" { es: "Backtesting", en: "Backtesting" }
    Comparison => "comparison" { es: "Comparación", en: "Comparison" }
    Sandbox => "sandbox" { es: "Sandbox Educativo", en: "Educational Sandbox" }
    Simulation => "simulation" { es: "Simulación", en: "Simulation" }
    DataManagement => "dataManagement" { es: "Gestión de Datos", en: "Data Management" }
    Export => "export" { es: "Exportar", en: "Export" }
    Settings => "settings" { es: "Configuración", en: "Settings" }
    ThemeLabel => "theme" { es: "Tema", en: "Theme" }
    LanguageLabel => "language" { es: "Idioma", en: "Language" }
    LightTheme => "lightTheme" { es: "Claro", en: "Light" }
    DarkTheme => "darkTheme" { es: "Oscuro", en: "Dark" }
    Spanish => "spanish" { es: "Español", en: "Spanish" }
    English => "english" { es: "English", en: "English" }
    CurrentPrice => "currentPrice" { es: "Precio Actual", en: "Current Price" }
    Trend => "trend" { es: "Tendencia", en: "Trend" }
    Decision => "decision" { es: "Decisión", en: "Decision" }
    Confidence => "confidence" { es: "Confianza", en: "Confidence" }
    Prediction24h => "prediction24h" { es: "Predicción 24h", en: "24h Prediction" }
    Rsi => "rsi" { es: "RSI", en: "RSI" }
    Macd => "macd" { es: "MACD", en: "MACD" }
    Volume => "volume" { es: "Volumen", en: "Volume" }
    InitialCapital => "initialCapital" { es: "Capital Inicial", en: "Initial Capital" }
    FinalCapital => "finalCapital" { es: "Capital Final", en: "Final Capital" }
    TotalReturn => "totalReturn" { es: "Retorno Total", en: "Total Return" }
    BuyAndHold => "buyAndHold" { es: "Buy & Hold", en: "Buy & Hold" }
    MaxDrawdown => "maxDrawdown" { es: "Max Drawdown", en: "Max Drawdown" }
    Operations => "operations" { es: "Operaciones", en: "Operations" }
    Winners => "winners" { es: "Ganadoras", en: "Winners" }
    Losers => "losers" { es: "Perdedoras", en: "Losers" }
    Buy => "buy" { es: "Compra", en: "Buy" }
    Sell => "sell" { es: "Venta", en: "Sell" }
    Hold => "hold" { es: "Mantener", en: "Hold" }
    Bullish => "bullish" { es: "Alcista", en: "Bullish" }
    Bearish => "bearish" { es: "Bajista", en: "Bearish" }
    Neutral => "neutral" { es: "Neutral", en: "Neutral" }
    Overbought => "overbought" { es: "Sobrecompra", en: "Overbought" }
    Oversold => "oversold" { es: "Sobreventa", en: "Oversold" }
    Volatility => "volatility" { es: "Volatilidad", en: "Volatility" }
    Momentum => "momentum" { es: "Momento", en: "Momentum" }
    MultipleComparison => "multipleComparison" { es: "Comparación Múltiple", en: "Multiple Comparison" }
    CandlestickChart => "candlestickChart" { es: "Gráfico de Velas", en: "Candlestick Chart" }
    LineChart => "lineChart" { es: "Gráfico de Línea", en: "Line Chart" }
    BarChart => "barChart" { es: "Gráfico de Barras", en: "Bar Chart" }
    AreaChart => "areaChart" { es: "Gráfico de Área", en: "Area Chart" }
    ScatterChart => "scatterChart" { es: "Gráfico de Dispersión", en: "Scatter Chart" }
    ExportImage => "exportImage" { es: "Exportar Imagen", en: "Export Image" }
    ExportPdf => "exportPDF" { es: "Exportar PDF", en: "Export PDF" }
    ExportCsv => "exportCSV" { es: "Exportar CSV", en: "Export CSV" }
    ExportJson => "exportJSON" { es: "Exportar JSON", en: "Export JSON" }
    AlertConfigured => "alertConfigured" { es: "Alerta configurada correctamente", en: "Alert configured successfully" }
    ErrorAlert => "errorAlert" { es: "Error al configurar alerta", en: "Error configuring alert" }
    DataUpdated => "dataUpdated" { es: "Datos actualizados", en: "Data updated" }
    ErrorData => "errorData" { es: "Error al actualizar datos", en: "Error updating data" }
    SimulationGenerated => "simulationGenerated" { es: "Simulación generada", en: "Simulation generated" }
    ErrorSimulation => "errorSimulation" { es: "Error al generar simulación", en: "Error generating simulation" }
    FileUploaded => "fileUploaded" { es: "Archivo subido correctamente", en: "File uploaded successfully" }
    ErrorFile => "errorFile" { es: "Error al subir archivo", en: "Error uploading file" }
    CryptoDeleted => "cryptoDeleted" { es: "Criptomoneda eliminada", en: "Cryptocurrency deleted" }
    ErrorDelete => "errorDelete" { es: "Error al eliminar criptomoneda", en: "Error deleting cryptocurrency" }
    BacktestingCompleted => "backtestingCompleted" { es: "Backtesting completado", en: "Backtesting completed" }
    ErrorBacktesting => "errorBacktesting" { es: "Error en backtesting", en: "Backtesting error" }
    ComparisonGenerated => "comparisonGenerated" { es: "Comparación generada", en: "Comparison generated" }
    ErrorComparison => "errorComparison" { es: "Error al generar comparación", en: "Error generating comparison" }
    LanguageChanged => "languageChanged" { es: "Idioma cambiado", en: "Language changed" }
    ThemeChanged => "themeChanged" { es: "Tema cambiado", en: "Theme changed" }
    SettingsSaved => "settingsSaved" { es: "Configuración guardada", en: "Settings saved" }
    ErrorSettings => "errorSettings" { es: "Error al guardar configuración", en: "Error saving settings" }
    LearnMore => "learnMore" { es: "Haz clic para aprender más", en: "Click to learn more" }
    Exporting => "exporting" { es: "Exportando...", en: "Exporting..." }
    NoDataToExport => "noDataToExport" { es: "No hay datos para exportar", en: "No data to export" }
    UnsupportedFormat => "unsupportedFormat" { es: "Formato no soportado", en: "Unsupported format" }
    ExportInProgress => "exportInProgress" { es: "Ya hay una exportación en curso", en: "An export is already in progress" }
    ExportCompleted => "exportCompleted" { es: "Exportación {format} completada", en: "{format} export completed" }
    ExportFailed => "exportFailed" { es: "Error al exportar", en: "Export failed" }
    FieldRange => "fieldRange" { es: "Rango", en: "Range" }
    FieldSignals => "fieldSignals" { es: "Señales", en: "Signals" }
    FieldRule => "fieldRule" { es: "Regla", en: "Rule" }
    FieldImportance => "fieldImportance" { es: "Importancia", en: "Importance" }
    FieldUsage => "fieldUsage" { es: "Uso", en: "Usage" }
    FieldTools => "fieldTools" { es: "Herramientas", en: "Tools" }
    FieldImplication => "fieldImplication" { es: "Implicación", en: "Implication" }
    FieldFormula => "fieldFormula" { es: "Fórmula", en: "Formula" }
    FieldExample => "fieldExample" { es: "Ejemplo práctico", en: "Practical example" }
    FieldCommonError => "fieldCommonError" { es: "Error común", en: "Common mistake" }
    FieldSolution => "fieldSolution" { es: "Solución", en: "Solution" }
    FieldConsequence => "fieldConsequence" { es: "Consecuencia", en: "Consequence" }
    FieldProtection => "fieldProtection" { es: "Protección", en: "Protection" }
    FieldExercise => "fieldExercise" { es: "Ejercicio", en: "Exercise" }
}

/// Applies the active language to a document
pub struct LocalizationApplier;

impl LocalizationApplier {
    /// Sets the document title and swaps the language toggle icon.
    ///
    /// The toggle shows the flag of the language it switches to.
    pub fn apply(surface: &mut dyn DocumentSurface, language: Language) {
        surface.set_title(translate(language, TextKey::Title));

        let icon = match language {
            Language::Es => r#"<i class="fas fa-flag-usa"></i>"#,
            Language::En => r#"<i class="fas fa-flag"></i>"#,
        };
        if !surface.set_language_toggle(icon) {
            debug!("no language toggle control on this page");
        }
        debug!(language = language.token(), "applied language");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_key_translated_in_every_language() {
        for language in Language::ALL {
            for key in TextKey::ALL {
                assert!(
                    !translate(language, *key).is_empty(),
                    "{:?} missing for {:?}",
                    key,
                    language
                );
            }
        }
    }

    #[test]
    fn test_key_names_are_unique_and_resolvable() {
        let mut seen = HashSet::new();
        for key in TextKey::ALL {
            assert!(seen.insert(key.name()), "duplicate key name {}", key.name());
            assert_eq!(TextKey::from_name(key.name()), Some(*key));
        }
        assert_eq!(TextKey::from_name("doesNotExist"), None);
    }

    #[test]
    fn test_dashboard_key_set_is_present() {
        for name in ["title", "onlineMode", "exportCSV", "errorSettings", "prediction24h"] {
            assert!(TextKey::from_name(name).is_some(), "{} missing", name);
        }
        assert!(TextKey::ALL.len() >= 77);
    }

    #[test]
    fn test_language_from_locale() {
        assert_eq!(Language::from_locale("en-US"), Language::En);
        assert_eq!(Language::from_locale("en_GB.UTF-8"), Language::En);
        assert_eq!(Language::from_locale("EN"), Language::En);
        assert_eq!(Language::from_locale("es-ES"), Language::Es);
        assert_eq!(Language::from_locale("fr-FR"), Language::Es);
        assert_eq!(Language::from_locale(""), Language::Es);
    }

    #[test]
    fn test_title_per_language() {
        assert_eq!(translate(Language::Es, TextKey::Title), "Cripto Analizador Pro");
        assert_eq!(translate(Language::En, TextKey::Title), "Crypto Analyzer Pro");
    }
}
