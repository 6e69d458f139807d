//! Settings persistence coordination.
//!
//! Remembers the last selected view between runs using eframe's persistent
//! storage. Values are stored as JSON strings.

use serde::{Deserialize, Serialize};
use snapview::ViewKind;

const LAST_VIEW_KEY: &str = "last_view";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from persistent storage with a custom default.
    ///
    /// # Type Parameters
    /// * `T` - The type to deserialize
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface
    /// * `key` - The storage key for this setting
    /// * `default` - Returned when the key is missing or does not parse
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        storage
            .and_then(|storage| storage.get_string(key))
            .and_then(|json_str| serde_json::from_str(&json_str).ok())
            .unwrap_or(default)
    }

    /// Saves a setting to persistent storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        if let Ok(json_str) = serde_json::to_string(value) {
            storage.set_string(key, json_str);
        }
    }

    /// Last view the user had open, or `fallback` on first run.
    pub fn load_last_view(storage: Option<&dyn eframe::Storage>, fallback: ViewKind) -> ViewKind {
        Self::load_setting_or(storage, LAST_VIEW_KEY, fallback)
    }

    pub fn save_last_view(storage: &mut dyn eframe::Storage, view: ViewKind) {
        Self::save_setting(storage, LAST_VIEW_KEY, &view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self { data: HashMap::new() }
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
    fn test_first_run_uses_fallbacks() {
        let storage = MockStorage::new();
        assert_eq!(SettingsCoordinator::load_last_view(Some(&storage), ViewKind::Devices), ViewKind::Devices);
        assert_eq!(SettingsCoordinator::load_last_view(None, ViewKind::Game), ViewKind::Game);
    }

    #[test]
    fn test_last_view_round_trip() {
        let mut storage = MockStorage::new();
        SettingsCoordinator::save_last_view(&mut storage, ViewKind::System);

        assert_eq!(storage.data.get("last_view").map(String::as_str), Some("\"system\""));
        assert_eq!(SettingsCoordinator::load_last_view(Some(&storage), ViewKind::Game), ViewKind::System);
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let mut storage = MockStorage::new();
        storage.set_string("last_view", "not json".to_string());
        assert_eq!(SettingsCoordinator::load_last_view(Some(&storage), ViewKind::Game), ViewKind::Game);
    }
}
