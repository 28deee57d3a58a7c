//! Host-side error types

use std::path::PathBuf;

use rmx_core::SettingsError;
use thiserror::Error;

/// Errors raised on the control side of the host
#[derive(Error, Debug)]
pub enum HostError {
    /// Settings file could not be read
    #[error("Failed to read settings from {path:?}: {source}")]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file could not be written
    #[error("Failed to write settings to {path:?}: {source}")]
    SettingsWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not a valid settings map
    #[error("Invalid settings JSON in {path:?}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Settings map could not be encoded as JSON
    #[error("Failed to encode settings: {0}")]
    SettingsEncode(serde_json::Error),

    /// A settings value has the wrong type
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// WAV decoding or encoding failed
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio has a channel count no speaker layout covers
    #[error("Unsupported channel count {0} (supported: 1-6 or 8)")]
    UnsupportedChannels(usize),
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;
