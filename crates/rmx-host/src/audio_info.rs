//! The host's global audio format: sample rate and speaker layout.

use crate::error::{HostError, HostResult};

/// Output speaker layouts the host can run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeakerLayout {
    Mono,
    #[default]
    Stereo,
    TwoPointOne,
    Quad,
    FourPointOne,
    FivePointOne,
    SevenPointOne,
}

impl SpeakerLayout {
    pub const fn channel_count(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::TwoPointOne => 3,
            Self::Quad => 4,
            Self::FourPointOne => 5,
            Self::FivePointOne => 6,
            Self::SevenPointOne => 8,
        }
    }

    pub fn from_channel_count(channels: usize) -> HostResult<Self> {
        match channels {
            1 => Ok(Self::Mono),
            2 => Ok(Self::Stereo),
            3 => Ok(Self::TwoPointOne),
            4 => Ok(Self::Quad),
            5 => Ok(Self::FourPointOne),
            6 => Ok(Self::FivePointOne),
            8 => Ok(Self::SevenPointOne),
            other => Err(HostError::UnsupportedChannels(other)),
        }
    }
}

/// Global audio configuration queried by filters at update time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub speakers: SpeakerLayout,
}

impl AudioInfo {
    pub fn new(sample_rate: u32, speakers: SpeakerLayout) -> Self {
        Self {
            sample_rate,
            speakers,
        }
    }

    /// Number of active output channels.
    pub fn channels(&self) -> usize {
        self.speakers.channel_count()
    }
}

impl Default for AudioInfo {
    fn default() -> Self {
        Self::new(48_000, SpeakerLayout::Stereo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_round_trip_through_count() {
        for layout in [
            SpeakerLayout::Mono,
            SpeakerLayout::Stereo,
            SpeakerLayout::TwoPointOne,
            SpeakerLayout::Quad,
            SpeakerLayout::FourPointOne,
            SpeakerLayout::FivePointOne,
            SpeakerLayout::SevenPointOne,
        ] {
            let back = SpeakerLayout::from_channel_count(layout.channel_count()).unwrap();
            assert_eq!(back, layout);
        }
    }

    #[test]
    fn seven_channels_is_unsupported() {
        assert!(matches!(
            SpeakerLayout::from_channel_count(7),
            Err(HostError::UnsupportedChannels(7))
        ));
        assert!(SpeakerLayout::from_channel_count(0).is_err());
    }

    #[test]
    fn default_is_stereo() {
        assert_eq!(AudioInfo::default().channels(), 2);
    }
}
