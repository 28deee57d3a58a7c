//! Filter trait: the seam between the host and an audio filter.

use rmx_core::{AudioPlanes, SettingsError, SettingsMap};

/// Static metadata about a filter.
pub struct FilterInfo {
    /// Stable identifier the host registers the filter under.
    pub id: &'static str,
    /// Default display name.
    pub name: &'static str,
}

/// Core trait for host-driven audio filters.
///
/// `update` runs on the control path; `filter_audio` runs on the realtime
/// audio path and must not block or allocate.
pub trait AudioFilter: Send {
    fn info(&self) -> &FilterInfo;

    /// Fill in defaults for any keys missing from `settings`.
    fn defaults(&self, settings: &mut SettingsMap);

    /// Re-read settings for an output layout of `channels` channels.
    fn update(&mut self, settings: &SettingsMap, channels: usize) -> Result<(), SettingsError>;

    /// Process one host buffer in place and hand it back.
    fn filter_audio<'b, 'a>(&mut self, audio: &'b mut AudioPlanes<'a>) -> &'b mut AudioPlanes<'a>;
}
