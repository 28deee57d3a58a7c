//! Channel remix processor: per-output route selection followed by gain.

use std::sync::Arc;

use basedrop::Owned;
use rmx_core::{
    AudioPlanes, RemixSettings, Route, SettingsError, SettingsMap, MAX_PLANES, QUANTUM_FRAMES,
};

use crate::filter::{AudioFilter, FilterInfo};
use crate::scratch::ScratchBank;
use crate::table::{RemixHandle, RemixSnapshot, RemixTable};

/// Host-facing filter identifier.
pub const FILTER_ID: &str = "SLRematrix";

/// Default display name of a new filter instance.
pub const FILTER_NAME: &str = "SLRematrixDefault";

static INFO: FilterInfo = FilterInfo {
    id: FILTER_ID,
    name: FILTER_NAME,
};

/// Routes each output channel from a chosen input channel and applies a
/// per-channel gain.
///
/// The route/gain table lives behind a [`RemixHandle`] so the control path
/// can update it from another thread. The processor itself owns the
/// scratch planes and is driven from the audio thread.
pub struct ChannelRemixProcessor {
    table: Arc<RemixTable>,
    scratch: Owned<ScratchBank>,
}

impl ChannelRemixProcessor {
    /// Create a processor for `channels` active channels.
    pub fn new(channels: usize, routes: &[Route], gains_db: &[f32]) -> Self {
        let table = Arc::new(RemixTable::new());
        table.configure(channels, routes, gains_db);

        let mut scratch = table.own_bank(ScratchBank::new(1));
        table.adopt_bank(&mut scratch);

        Self { table, scratch }
    }

    /// Create a processor from persisted settings.
    pub fn from_settings(channels: usize, settings: &RemixSettings) -> Self {
        let processor = Self::new(channels, &[], &[]);
        processor.handle().configure_settings(channels, settings);
        processor
    }

    /// Control handle for other threads.
    pub fn handle(&self) -> RemixHandle {
        RemixHandle {
            table: Arc::clone(&self.table),
        }
    }

    /// Store new routes and dB gains. Same as [`RemixHandle::configure`].
    pub fn configure(&self, channels: usize, routes: &[Route], gains_db: &[f32]) {
        self.table.configure(channels, routes, gains_db);
    }

    /// Active channel count as last configured.
    pub fn channels(&self) -> usize {
        self.table.channels()
    }

    /// Current route/gain values.
    pub fn snapshot(&self) -> RemixSnapshot {
        self.table.snapshot()
    }

    /// Remix up to `frames` frames of `audio` in place.
    ///
    /// Never blocks on the control path, never allocates, and never frees:
    /// a scratch bank replaced here is reclaimed by the collector thread.
    pub fn process<'b, 'a>(
        &mut self,
        audio: &'b mut AudioPlanes<'a>,
        frames: usize,
    ) -> &'b mut AudioPlanes<'a> {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.remix(audio, frames));
        #[cfg(not(feature = "alloc_check"))]
        self.remix(audio, frames);
        audio
    }

    fn remix(&mut self, audio: &mut AudioPlanes<'_>, frames: usize) {
        self.table.adopt_bank(&mut self.scratch);

        // One snapshot per call: a concurrent configure lands on the next call.
        let snapshot = self.table.snapshot();
        let channels = self.scratch.channels();
        let frames = frames.min(audio.frames());

        let mut start = 0;
        while start < frames {
            let len = (frames - start).min(QUANTUM_FRAMES);
            let end = start + len;

            // Stage every output before writing any, so permuted routes
            // read unmodified input.
            let mut routed = [false; MAX_PLANES];
            for (ch, routed) in routed.iter_mut().enumerate().take(channels) {
                let source = snapshot.routes[ch]
                    .source(channels)
                    .and_then(|src| audio.plane(src));
                if let Some(src) = source {
                    self.scratch.plane_mut(ch)[..len].copy_from_slice(&src[start..end]);
                    *routed = true;
                }
            }

            for (ch, &routed) in routed.iter().enumerate().take(channels) {
                let Some(dst) = audio.plane_mut(ch) else {
                    continue;
                };
                let dst = &mut dst[start..end];
                if routed {
                    let gain = snapshot.gains[ch];
                    for (out, &s) in dst.iter_mut().zip(&self.scratch.plane(ch)[..len]) {
                        *out = s * gain;
                    }
                } else {
                    // Muted: zero whatever the gain.
                    dst.fill(0.0);
                }
            }

            start = end;
        }
    }
}

impl AudioFilter for ChannelRemixProcessor {
    fn info(&self) -> &FilterInfo {
        &INFO
    }

    fn defaults(&self, settings: &mut SettingsMap) {
        rmx_core::settings::apply_defaults(settings);
    }

    fn update(&mut self, settings: &SettingsMap, channels: usize) -> Result<(), SettingsError> {
        let settings = RemixSettings::from_map(settings)?;
        self.handle().configure_settings(channels, &settings);
        Ok(())
    }

    fn filter_audio<'b, 'a>(&mut self, audio: &'b mut AudioPlanes<'a>) -> &'b mut AudioPlanes<'a> {
        let frames = audio.frames();
        self.process(audio, frames)
    }
}
