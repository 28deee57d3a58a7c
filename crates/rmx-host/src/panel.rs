//! Headless model of the rematrix editing panel.
//!
//! One row per active output channel: a route selector and a gain in dB
//! with a paired slider. `accept` writes the edited rows back into the
//! settings map.

use rmx_core::gain::{clamp_db, db_to_slider, slider_to_db};
use rmx_core::settings::{GAIN_KEYS, INPUT_LABELS, OUTPUT_LABELS, ROUTE_KEYS};
use rmx_core::{mul_to_db, Route, SettingValue, SettingsMap, MAX_PLANES};
use rmx_engine::RemixSnapshot;

/// One entry in a route selector.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOption {
    pub label: String,
    /// Property key of an input option; mute has none.
    pub property: Option<&'static str>,
    pub route: Route,
}

/// Route selector options for `channels` active inputs: mute, then one
/// entry per input channel.
pub fn route_options(channels: usize) -> Vec<RouteOption> {
    let mut options = Vec::with_capacity(channels + 1);
    options.push(RouteOption {
        label: "Mute".to_string(),
        property: None,
        route: Route::MUTE,
    });
    for ch in 0..channels.min(MAX_PLANES) {
        options.push(RouteOption {
            label: format!("Input Channel {}", ch),
            property: Some(INPUT_LABELS[ch]),
            route: Route::identity(ch),
        });
    }
    options
}

/// Controls for one output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelControl {
    pub title: String,
    pub property: &'static str,
    pub options: Vec<RouteOption>,
    selected: usize,
    gain_db: f64,
}

impl ChannelControl {
    fn new(ch: usize, channels: usize, route: Route, gain: f32) -> Self {
        let options = route_options(channels);
        // An unknown route falls back to the matching input channel.
        let selected = options
            .iter()
            .position(|o| o.route == route)
            .unwrap_or((ch + 1).min(options.len() - 1));
        Self {
            title: format!("Output Channel {}", ch + 1),
            property: OUTPUT_LABELS[ch],
            options,
            selected,
            gain_db: clamp_db(mul_to_db(gain) as f64),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Route of the selected option.
    pub fn route(&self) -> Route {
        self.options[self.selected].route
    }

    /// Select an option by index. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Select the option carrying `route`, if offered.
    pub fn select_route(&mut self, route: Route) -> bool {
        match self.options.iter().position(|o| o.route == route) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    pub fn gain_db(&self) -> f64 {
        self.gain_db
    }

    /// Spin box edit; the value is clamped to the gain range.
    pub fn set_gain_db(&mut self, db: f64) {
        self.gain_db = clamp_db(db);
    }

    pub fn slider(&self) -> i32 {
        db_to_slider(self.gain_db)
    }

    /// Slider edit; the spin box follows at 0.1 dB resolution.
    pub fn set_slider(&mut self, position: i32) {
        self.gain_db = slider_to_db(position);
    }
}

/// Editing panel state for all active output channels.
#[derive(Debug, Clone, PartialEq)]
pub struct RemixPanel {
    controls: Vec<ChannelControl>,
}

impl RemixPanel {
    /// Build the panel from the filter's live route/gain values.
    pub fn from_snapshot(channels: usize, snapshot: &RemixSnapshot) -> Self {
        let channels = channels.min(MAX_PLANES);
        Self {
            controls: (0..channels)
                .map(|ch| ChannelControl::new(ch, channels, snapshot.routes[ch], snapshot.gains[ch]))
                .collect(),
        }
    }

    pub fn controls(&self) -> &[ChannelControl] {
        &self.controls
    }

    pub fn control_mut(&mut self, ch: usize) -> Option<&mut ChannelControl> {
        self.controls.get_mut(ch)
    }

    /// Write route and gain keys of every active channel into `settings`.
    /// Keys of inactive channels are left as they are.
    pub fn accept(&self, settings: &mut SettingsMap) {
        for (ch, control) in self.controls.iter().enumerate() {
            settings.insert(ROUTE_KEYS[ch].to_string(), SettingValue::Int(control.route().0));
            settings.insert(GAIN_KEYS[ch].to_string(), SettingValue::Float(control.gain_db));
        }
    }
}
