//! JSON persistence for the filter's settings map.

use std::path::{Path, PathBuf};

use rmx_core::settings::apply_defaults;
use rmx_core::SettingsMap;

use crate::error::{HostError, HostResult};

/// A settings map stored as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings map, filling in defaults for missing keys.
    ///
    /// A missing file yields the default map.
    pub fn load(&self) -> HostResult<SettingsMap> {
        log::info!("load settings: {:?}", self.path);

        let mut map = if self.path.exists() {
            let contents =
                std::fs::read_to_string(&self.path).map_err(|source| HostError::SettingsRead {
                    path: self.path.clone(),
                    source,
                })?;
            serde_json::from_str::<SettingsMap>(&contents).map_err(|source| {
                HostError::SettingsParse {
                    path: self.path.clone(),
                    source,
                }
            })?
        } else {
            log::info!("load settings: file doesn't exist, using defaults");
            SettingsMap::new()
        };

        apply_defaults(&mut map);
        Ok(map)
    }

    /// Save the settings map, creating parent directories as needed.
    pub fn save(&self, map: &SettingsMap) -> HostResult<()> {
        log::info!("save settings: {:?}", self.path);

        let write_err = |source| HostError::SettingsWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let json = Self::to_json(map)?;
        std::fs::write(&self.path, json).map_err(write_err)
    }

    /// Pretty JSON text of a settings map, as `save` would write it.
    pub fn to_json(map: &SettingsMap) -> HostResult<String> {
        serde_json::to_string_pretty(map).map_err(HostError::SettingsEncode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmx_core::SettingValue;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("none.json"));
        let map = store.load().unwrap();
        assert_eq!(map.get("route 3"), Some(&SettingValue::Int(3)));
        assert_eq!(map.get("gain 3"), Some(&SettingValue::Float(0.0)));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/dir/rematrix.json"));

        let mut map = SettingsMap::new();
        map.insert("route 0".into(), SettingValue::Int(-1));
        map.insert("gain 1".into(), SettingValue::Float(-4.5));
        map.insert("profile_name".into(), SettingValue::Text("Swap".into()));
        store.save(&map).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.get("route 0"), Some(&SettingValue::Int(-1)));
        assert_eq!(loaded.get("gain 1"), Some(&SettingValue::Float(-4.5)));
        assert_eq!(loaded.get("profile_name"), Some(&SettingValue::Text("Swap".into())));
        assert_eq!(loaded.get("route 1"), Some(&SettingValue::Int(1)));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, HostError::SettingsParse { .. }));
    }

    #[test]
    fn to_json_matches_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("rematrix.json"));
        let map = rmx_core::RemixSettings::defaults_map();
        store.save(&map).unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(SettingsStore::to_json(&map).unwrap(), text);
        assert!(text.contains("\"route 7\": 7"));
    }
}
