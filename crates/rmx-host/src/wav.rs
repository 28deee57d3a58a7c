//! WAV decoding and 32-bit float encoding for offline rendering.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use rmx_core::AudioBuffer;

use crate::audio_info::SpeakerLayout;
use crate::error::HostResult;

/// Decode a WAV file into a planar buffer. Returns the buffer and sample rate.
///
/// Only channel counts with a speaker layout (1-6 or 8) are accepted.
pub fn read_wav(path: &Path) -> HostResult<(AudioBuffer, u32)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    SpeakerLayout::from_channel_count(channels)?;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
    };

    log::info!(
        "read_wav: {:?} ({} ch, {} Hz, {} frames)",
        path,
        channels,
        spec.sample_rate,
        samples.len() / channels
    );
    Ok((AudioBuffer::from_interleaved(&samples, spec.channels), spec.sample_rate))
}

/// Encode a planar buffer as a 32-bit float WAV file.
pub fn write_wav(path: &Path, buffer: &AudioBuffer, sample_rate: u32) -> HostResult<()> {
    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for sample in buffer.to_interleaved() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    log::info!("write_wav: {:?} ({} frames)", path, buffer.frames());
    Ok(())
}
