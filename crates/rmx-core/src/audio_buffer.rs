//! Multichannel f32 audio buffer with planar layout.

use alloc::vec;
use alloc::vec::Vec;

use crate::audio_planes::AudioPlanes;

/// Maximum number of audio planes (channels) a filter can see.
pub const MAX_PLANES: usize = 8;

/// Host processing quantum in frames.
pub const QUANTUM_FRAMES: usize = 1024;

/// A multichannel f32 audio buffer in planar layout.
///
/// Data is stored as `channels` contiguous planes of `frames` samples each.
/// `data[ch * frames + frame]` gives the sample for channel `ch` at `frame`.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    data: Vec<f32>,
    channels: u16,
    frames: usize,
}

impl AudioBuffer {
    /// Create a new silent buffer with the given dimensions.
    pub fn new(channels: u16, frames: usize) -> Self {
        Self {
            data: vec![0.0; channels as usize * frames],
            channels,
            frames,
        }
    }

    /// Build a planar buffer from interleaved samples.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channels: u16) -> Self {
        let chs = channels.max(1) as usize;
        let frames = samples.len() / chs;
        let mut buf = Self::new(channels.max(1), frames);
        for (frame, chunk) in samples.chunks_exact(chs).enumerate() {
            for (ch, &s) in chunk.iter().enumerate() {
                buf.data[ch * frames + frame] = s;
            }
        }
        buf
    }

    /// Interleave all planes into a single sample vector.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let chs = self.channels as usize;
        let mut out = Vec::with_capacity(self.data.len());
        for frame in 0..self.frames {
            for ch in 0..chs {
                out.push(self.data[ch * self.frames + frame]);
            }
        }
        out
    }

    /// Number of channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Read-only access to one channel's sample data.
    pub fn channel(&self, ch: u16) -> &[f32] {
        let start = ch as usize * self.frames;
        &self.data[start..start + self.frames]
    }

    /// Mutable access to one channel's sample data.
    pub fn channel_mut(&mut self, ch: u16) -> &mut [f32] {
        let start = ch as usize * self.frames;
        let len = self.frames;
        &mut self.data[start..start + len]
    }

    /// Borrow every plane as a filter view.
    ///
    /// Channels beyond `MAX_PLANES` are not visible through the view.
    pub fn planes_mut(&mut self) -> AudioPlanes<'_> {
        let frames = self.frames;
        if frames == 0 {
            return AudioPlanes::from_planes(empty_planes(self.channels), 0);
        }
        AudioPlanes::from_planes(self.data.chunks_mut(frames).map(Some), frames)
    }

    /// Borrow a frame range of every plane as a filter view.
    pub fn planes_range_mut(&mut self, start: usize, len: usize) -> AudioPlanes<'_> {
        let frames = self.frames;
        let start = start.min(frames);
        let end = (start + len).min(frames);
        if frames == 0 {
            return AudioPlanes::from_planes(empty_planes(self.channels), 0);
        }
        AudioPlanes::from_planes(
            self.data
                .chunks_mut(frames)
                .map(|plane| Some(&mut plane[start..end])),
            end - start,
        )
    }
}

fn empty_planes<'a>(channels: u16) -> impl Iterator<Item = Option<&'a mut [f32]>> {
    (0..channels).map(|_| Some(<&mut [f32]>::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_silent() {
        let buf = AudioBuffer::new(2, 4);
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.frames(), 4);
        assert!(buf.channel(0).iter().all(|&s| s == 0.0));
        assert!(buf.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn channel_mut_writes_correctly() {
        let mut buf = AudioBuffer::new(2, 2);
        buf.channel_mut(0)[0] = 1.0;
        buf.channel_mut(1)[1] = -0.5;
        assert_eq!(buf.channel(0), &[1.0, 0.0]);
        assert_eq!(buf.channel(1), &[0.0, -0.5]);
    }

    #[test]
    fn interleave_round_trips_planes() {
        let interleaved = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let buf = AudioBuffer::from_interleaved(&interleaved, 2);
        assert_eq!(buf.frames(), 3);
        assert_eq!(buf.channel(0), &[0.1, 0.3, 0.5]);
        assert_eq!(buf.channel(1), &[0.2, 0.4, 0.6]);
        assert_eq!(buf.to_interleaved(), interleaved.to_vec());
    }

    #[test]
    fn from_interleaved_drops_partial_frame() {
        let buf = AudioBuffer::from_interleaved(&[1.0, 2.0, 3.0], 2);
        assert_eq!(buf.frames(), 1);
        assert_eq!(buf.channel(1), &[2.0]);
    }

    #[test]
    fn planes_mut_exposes_every_channel() {
        let mut buf = AudioBuffer::new(3, 4);
        {
            let mut planes = buf.planes_mut();
            assert_eq!(planes.len(), 3);
            assert_eq!(planes.frames(), 4);
            planes.plane_mut(2).unwrap()[3] = 0.25;
        }
        assert_eq!(buf.channel(2)[3], 0.25);
    }

    #[test]
    fn planes_range_mut_clamps_to_buffer() {
        let mut buf = AudioBuffer::new(2, 10);
        {
            let mut planes = buf.planes_range_mut(8, 5);
            assert_eq!(planes.frames(), 2);
            planes.plane_mut(0).unwrap()[0] = 1.0;
        }
        assert_eq!(buf.channel(0)[8], 1.0);
    }

    #[test]
    fn empty_buffer_has_empty_planes() {
        let mut buf = AudioBuffer::new(2, 0);
        let planes = buf.planes_mut();
        assert_eq!(planes.len(), 2);
        assert_eq!(planes.frames(), 0);
    }
}
