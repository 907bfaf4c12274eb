//! Theme and language preference persistence.
//!
//! Preferences live in the host's durable key/value storage as two
//! independent scalar entries. A missing entry means "unresolved" and falls
//! back to the system signals; system-derived defaults are never written
//! back until the user toggles explicitly.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::i18n::Language;
use crate::theme::Theme;
use crate::traits::SystemSignals;

/// Storage key for the theme token
pub const THEME_KEY: &str = "theme";
/// Storage key for the language token
pub const LANGUAGE_KEY: &str = "lang";

/// The resolved, currently active preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preference {
    pub theme: Theme,
    pub language: Language,
}

/// Snapshot of the system signals taken when the store is created
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticSignals {
    pub prefers_light: bool,
    pub locale: Option<String>,
}

impl StaticSignals {
    pub fn new(prefers_light: bool, locale: Option<String>) -> Self {
        Self { prefers_light, locale }
    }

    /// Captures the signals of any `SystemSignals` implementation
    pub fn capture(signals: &dyn SystemSignals) -> Self {
        Self {
            prefers_light: signals.prefers_light_scheme(),
            locale: signals.locale(),
        }
    }
}

impl SystemSignals for StaticSignals {
    fn prefers_light_scheme(&self) -> bool {
        self.prefers_light
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }
}

/// Reads the process locale from the usual environment variables
pub fn env_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

/// Plain map implementing `eframe::Storage`.
///
/// Hosts that do not own their storage seed one of these with the stored
/// preference entries at startup and copy [`PreferenceStore::stored_entries`]
/// back on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the preference keys out of `source`
    pub fn seeded_from(source: Option<&dyn eframe::Storage>) -> Self {
        let mut storage = Self::new();
        if let Some(source) = source {
            for key in [THEME_KEY, LANGUAGE_KEY] {
                if let Some(value) = source.get_string(key) {
                    storage.entries.insert(key.to_string(), value);
                }
            }
        }
        storage
    }
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn flush(&mut self) {}
}

/// Durable preference store with in-memory fallback.
///
/// Writes always land in an in-memory overlay first, so the store keeps
/// working for the rest of the session when no durable storage exists.
pub struct PreferenceStore {
    storage: Option<Box<dyn eframe::Storage>>,
    overlay: HashMap<&'static str, String>,
    signals: StaticSignals,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("durable", &self.storage.is_some())
            .field("overlay", &self.overlay)
            .field("signals", &self.signals)
            .finish()
    }
}

impl PreferenceStore {
    /// Creates a store over optional durable storage.
    ///
    /// `None` means storage is unavailable; the store then runs in memory only.
    pub fn new(storage: Option<Box<dyn eframe::Storage>>, signals: &dyn SystemSignals) -> Self {
        if storage.is_none() {
            warn!("durable storage unavailable; preferences will not survive restart");
        }
        Self {
            storage,
            overlay: HashMap::new(),
            signals: StaticSignals::capture(signals),
        }
    }

    /// Creates a purely in-memory store
    pub fn in_memory(signals: &dyn SystemSignals) -> Self {
        Self {
            storage: None,
            overlay: HashMap::new(),
            signals: StaticSignals::capture(signals),
        }
    }

    /// Returns true if writes reach durable storage
    pub fn is_durable(&self) -> bool {
        self.storage.is_some()
    }

    fn read(&self, key: &'static str) -> Option<String> {
        if let Some(value) = self.overlay.get(key) {
            return Some(value.clone());
        }
        self.storage.as_ref().and_then(|storage| storage.get_string(key))
    }

    fn write(&mut self, key: &'static str, value: &str) {
        self.overlay.insert(key, value.to_string());
        if let Some(storage) = self.storage.as_mut() {
            storage.set_string(key, value.to_string());
            storage.flush();
        }
    }

    /// Raw stored entries, for copying into another storage
    pub fn stored_entries(&self) -> Vec<(&'static str, String)> {
        [THEME_KEY, LANGUAGE_KEY]
            .into_iter()
            .filter_map(|key| self.read(key).map(|value| (key, value)))
            .collect()
    }

    /// Stored theme, if a valid token is present
    pub fn stored_theme(&self) -> Option<Theme> {
        let token = self.read(THEME_KEY)?;
        let theme = Theme::from_token(&token);
        if theme.is_none() {
            warn!(token = %token, "ignoring unknown stored theme");
        }
        theme
    }

    /// Stored language, if a valid token is present
    pub fn stored_language(&self) -> Option<Language> {
        let token = self.read(LANGUAGE_KEY)?;
        let language = Language::from_token(&token);
        if language.is_none() {
            warn!(token = %token, "ignoring unknown stored language");
        }
        language
    }

    /// Stored theme, else light if the system asks for it, else dark
    pub fn resolve_theme(&self) -> Theme {
        self.stored_theme().unwrap_or(if self.signals.prefers_light {
            Theme::Light
        } else {
            Theme::Dark
        })
    }

    /// Stored language, else derived from the system locale, else Spanish
    pub fn resolve_language(&self) -> Language {
        self.stored_language().unwrap_or_else(|| {
            self.signals
                .locale
                .as_deref()
                .map(Language::from_locale)
                .unwrap_or(Language::Es)
        })
    }

    /// Both resolved preferences
    pub fn current(&self) -> Preference {
        Preference {
            theme: self.resolve_theme(),
            language: self.resolve_language(),
        }
    }

    pub fn persist_theme(&mut self, theme: Theme) {
        self.write(THEME_KEY, theme.token());
        info!(theme = theme.token(), "theme preference saved");
    }

    pub fn persist_language(&mut self, language: Language) {
        self.write(LANGUAGE_KEY, language.token());
        info!(language = language.token(), "language preference saved");
    }

    /// Persists and returns the complement of the resolved theme
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.resolve_theme().toggled();
        self.persist_theme(theme);
        theme
    }

    /// Persists and returns the complement of the resolved language
    pub fn toggle_language(&mut self) -> Language {
        let language = self.resolve_language().toggled();
        self.persist_language(language);
        language
    }
}
