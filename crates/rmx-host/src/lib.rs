//! Headless host for the rematrix filter.
//!
//! Plays the host's part in the filter lifecycle: owns the settings map
//! and the global audio format, creates and updates the filter, feeds it
//! audio, and backs the editing panel.

mod audio_info;
mod error;
mod panel;
mod store;
mod wav;

use rmx_core::settings::apply_defaults;
use rmx_core::{AudioBuffer, AudioPlanes, RemixSettings, SettingsMap, QUANTUM_FRAMES};
use rmx_engine::{AudioFilter, ChannelRemixProcessor, FilterInfo, RemixHandle};

// Re-export common types so callers don't need rmx-core/rmx-engine directly.
pub use rmx_core::{Route, SettingValue};
pub use rmx_engine::RemixSnapshot;

pub use audio_info::{AudioInfo, SpeakerLayout};
pub use error::{HostError, HostResult};
pub use panel::{route_options, ChannelControl, RemixPanel, RouteOption};
pub use store::SettingsStore;
pub use wav::{read_wav, write_wav};

/// A rematrix filter attached to a source, with the host state it needs.
pub struct FilterHost {
    audio_info: AudioInfo,
    settings: SettingsMap,
    filter: ChannelRemixProcessor,
}

impl FilterHost {
    /// Attach a filter configured from `settings` (defaults fill the gaps).
    pub fn attach(audio_info: AudioInfo, mut settings: SettingsMap) -> HostResult<Self> {
        apply_defaults(&mut settings);
        let typed = RemixSettings::from_map(&settings)?;
        let filter = ChannelRemixProcessor::from_settings(audio_info.channels(), &typed);

        let info = filter.info();
        log::info!(
            "Attached filter '{}' ({}) with {} channels, profile '{}'",
            info.name,
            info.id,
            audio_info.channels(),
            typed.profile_name
        );

        Ok(Self {
            audio_info,
            settings,
            filter,
        })
    }

    /// Default settings map for a new filter.
    pub fn defaults() -> SettingsMap {
        RemixSettings::defaults_map()
    }

    pub fn info(&self) -> &FilterInfo {
        self.filter.info()
    }

    pub fn audio_info(&self) -> AudioInfo {
        self.audio_info
    }

    /// Switch the global output format. Takes effect on the next update.
    pub fn set_audio_info(&mut self, audio_info: AudioInfo) {
        if audio_info != self.audio_info {
            log::info!(
                "Output layout {:?} -> {:?}",
                self.audio_info.speakers,
                audio_info.speakers
            );
        }
        self.audio_info = audio_info;
    }

    pub fn settings(&self) -> &SettingsMap {
        &self.settings
    }

    /// Typed view of the current settings.
    pub fn remix_settings(&self) -> HostResult<RemixSettings> {
        Ok(RemixSettings::from_map(&self.settings)?)
    }

    /// Replace the settings and push them to the filter, re-reading the
    /// output channel count from the current audio format.
    pub fn update(&mut self, mut settings: SettingsMap) -> HostResult<()> {
        self.filter.defaults(&mut settings);
        self.filter.update(&settings, self.audio_info.channels())?;
        self.settings = settings;
        Ok(())
    }

    /// Re-apply the current settings, e.g. after `set_audio_info`.
    pub fn refresh(&mut self) -> HostResult<()> {
        self.update(self.settings.clone())
    }

    /// Control handle for updating the filter from another thread.
    pub fn handle(&self) -> RemixHandle {
        self.filter.handle()
    }

    /// Editing panel seeded from the filter's live values.
    pub fn panel(&self) -> RemixPanel {
        RemixPanel::from_snapshot(self.audio_info.channels(), &self.filter.snapshot())
    }

    /// Commit an edited panel: write its rows into the settings and update.
    pub fn accept(&mut self, panel: &RemixPanel) -> HostResult<()> {
        let mut settings = self.settings.clone();
        panel.accept(&mut settings);
        self.update(settings)
    }

    /// Commit an edited panel and persist the settings.
    pub fn accept_and_save(&mut self, panel: &RemixPanel, store: &SettingsStore) -> HostResult<()> {
        self.accept(panel)?;
        store.save(&self.settings)
    }

    /// Run one host buffer through the filter.
    pub fn filter_audio<'b, 'a>(&mut self, audio: &'b mut AudioPlanes<'a>) -> &'b mut AudioPlanes<'a> {
        self.filter.filter_audio(audio)
    }

    /// Run a whole buffer through the filter in host-sized blocks.
    ///
    /// A `block_frames` of zero uses the processing quantum.
    pub fn render(&mut self, buffer: &mut AudioBuffer, block_frames: usize) {
        let block = if block_frames == 0 {
            QUANTUM_FRAMES
        } else {
            block_frames
        };
        let frames = buffer.frames();
        let mut start = 0;
        while start < frames {
            let mut planes = buffer.planes_range_mut(start, block);
            self.filter.filter_audio(&mut planes);
            start += block;
        }
    }
}
