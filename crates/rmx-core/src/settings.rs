//! Persisted filter settings and their flat key scheme.
//!
//! The host stores filter settings as a flat string-keyed map. Keys are
//! fixed tables indexed by channel so nothing is formatted at runtime.

use alloc::collections::BTreeMap;
use alloc::string::String;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio_buffer::MAX_PLANES;
use crate::gain::GAIN_DB_DEFAULT;
use crate::route::Route;

pub const PROFILE_NAME_KEY: &str = "profile_name";
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// `route <i>` keys, one per plane.
pub const ROUTE_KEYS: [&str; MAX_PLANES] = [
    "route 0", "route 1", "route 2", "route 3", "route 4", "route 5", "route 6", "route 7",
];

/// `gain <i>` keys, one per plane.
pub const GAIN_KEYS: [&str; MAX_PLANES] = [
    "gain 0", "gain 1", "gain 2", "gain 3", "gain 4", "gain 5", "gain 6", "gain 7",
];

/// Property labels for output channel selectors.
pub const OUTPUT_LABELS: [&str; MAX_PLANES] = [
    "out.ch.0", "out.ch.1", "out.ch.2", "out.ch.3", "out.ch.4", "out.ch.5", "out.ch.6", "out.ch.7",
];

/// Property labels for input channel options.
pub const INPUT_LABELS: [&str; MAX_PLANES] = [
    "in.ch.0", "in.ch.1", "in.ch.2", "in.ch.3", "in.ch.4", "in.ch.5", "in.ch.6", "in.ch.7",
];

/// A single value in the host settings map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    fn kind(&self) -> &'static str {
        match self {
            SettingValue::Int(_) => "an integer",
            SettingValue::Float(_) => "a number",
            SettingValue::Text(_) => "a string",
        }
    }
}

/// Flat settings map as stored by the host.
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// Error reading settings out of a [`SettingsMap`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("setting \"{key}\" should be {expected}, found {found}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Typed view of the rematrix filter settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RemixSettings {
    pub profile_name: String,
    pub routes: [Route; MAX_PLANES],
    pub gains_db: [f64; MAX_PLANES],
}

impl Default for RemixSettings {
    /// Identity routing at unity gain.
    fn default() -> Self {
        Self {
            profile_name: String::from(DEFAULT_PROFILE_NAME),
            routes: core::array::from_fn(Route::identity),
            gains_db: [GAIN_DB_DEFAULT; MAX_PLANES],
        }
    }
}

impl RemixSettings {
    /// Read settings from a host map. Missing keys take their defaults.
    pub fn from_map(map: &SettingsMap) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        for ch in 0..MAX_PLANES {
            if let Some(value) = map.get(ROUTE_KEYS[ch]) {
                settings.routes[ch] = Route(read_int(ROUTE_KEYS[ch], value)?);
            }
            if let Some(value) = map.get(GAIN_KEYS[ch]) {
                settings.gains_db[ch] = read_float(GAIN_KEYS[ch], value)?;
            }
        }

        match map.get(PROFILE_NAME_KEY) {
            Some(SettingValue::Text(name)) => settings.profile_name = name.clone(),
            Some(other) => {
                return Err(SettingsError::TypeMismatch {
                    key: PROFILE_NAME_KEY,
                    expected: "a string",
                    found: other.kind(),
                })
            }
            None => {}
        }

        Ok(settings)
    }

    /// Write every key to a fresh host map.
    pub fn to_map(&self) -> SettingsMap {
        let mut map = SettingsMap::new();
        for ch in 0..MAX_PLANES {
            self.write_channel(&mut map, ch);
        }
        map.insert(
            String::from(PROFILE_NAME_KEY),
            SettingValue::Text(self.profile_name.clone()),
        );
        map
    }

    /// Write the route and gain keys of one channel into `map`.
    pub fn write_channel(&self, map: &mut SettingsMap, ch: usize) {
        if ch >= MAX_PLANES {
            return;
        }
        map.insert(String::from(ROUTE_KEYS[ch]), SettingValue::Int(self.routes[ch].0));
        map.insert(String::from(GAIN_KEYS[ch]), SettingValue::Float(self.gains_db[ch]));
    }

    /// The default map the host overlays under user settings.
    pub fn defaults_map() -> SettingsMap {
        Self::default().to_map()
    }
}

/// Fill in any keys missing from `map` with their default values.
pub fn apply_defaults(map: &mut SettingsMap) {
    for (key, value) in RemixSettings::defaults_map() {
        map.entry(key).or_insert(value);
    }
}

fn read_int(key: &'static str, value: &SettingValue) -> Result<i64, SettingsError> {
    match value {
        SettingValue::Int(v) => Ok(*v),
        SettingValue::Float(v) => Ok(*v as i64),
        other => Err(SettingsError::TypeMismatch {
            key,
            expected: "an integer",
            found: other.kind(),
        }),
    }
}

fn read_float(key: &'static str, value: &SettingValue) -> Result<f64, SettingsError> {
    match value {
        SettingValue::Float(v) => Ok(*v),
        SettingValue::Int(v) => Ok(*v as f64),
        other => Err(SettingsError::TypeMismatch {
            key,
            expected: "a number",
            found: other.kind(),
        }),
    }
}
