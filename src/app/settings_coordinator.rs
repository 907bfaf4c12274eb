//! Window layout persistence coordination.
//!
//! Layout settings are stored as JSON strings in eframe's persistent storage,
//! next to the preference tokens the dashboard owns.

use crate::app::LayoutSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

pub const LAYOUT_KEY: &str = "layout";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads the window layout, falling back to defaults when absent or unreadable.
    pub fn load_layout(storage: Option<&dyn eframe::Storage>) -> LayoutSettings {
        Self::try_load_setting(storage, LAYOUT_KEY).unwrap_or_default()
    }

    pub fn save_layout(storage: &mut dyn eframe::Storage, layout: &LayoutSettings) {
        Self::save_setting(storage, LAYOUT_KEY, layout);
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let json_str = storage?.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "ignoring unreadable setting: {}", e);
                None
            }
        }
    }

    fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(e) => warn!(key, "failed to serialize setting: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }

        fn set_string_raw(&mut self, value: &str) {
            self.data.insert(LAYOUT_KEY.to_string(), value.to_string());
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_save_and_load_layout() {
        let mut storage = MockStorage::new();
        let layout = LayoutSettings {
            topics_width: 310.0,
            show_status_bar: false,
        };

        SettingsCoordinator::save_layout(&mut storage, &layout);

        assert_eq!(SettingsCoordinator::load_layout(Some(&storage)), layout);
    }

    #[test]
    fn test_missing_layout_uses_defaults() {
        let storage = MockStorage::new();
        assert_eq!(SettingsCoordinator::load_layout(Some(&storage)), LayoutSettings::default());
        assert_eq!(SettingsCoordinator::load_layout(None), LayoutSettings::default());
    }

    #[test]
    fn test_corrupt_layout_uses_defaults() {
        let mut storage = MockStorage::new();
        storage.set_string_raw("{not json");
        assert_eq!(SettingsCoordinator::load_layout(Some(&storage)), LayoutSettings::default());
    }

    #[test]
    fn test_partial_layout_fills_defaults() {
        let mut storage = MockStorage::new();
        storage.set_string_raw(r#"{"topics_width": 200.0}"#);

        let layout = SettingsCoordinator::load_layout(Some(&storage));
        assert_eq!(layout.topics_width, 200.0);
        assert!(layout.show_status_bar);
    }
}
