//! Borrowed planar view handed to a filter by the host.

use arrayvec::ArrayVec;

use crate::audio_buffer::MAX_PLANES;

/// A non-owning view over up to `MAX_PLANES` sample planes.
///
/// A plane slot may be empty when the host has no data for that channel
/// in this call. All present planes hold at least `frames()` samples.
#[derive(Debug, Default)]
pub struct AudioPlanes<'a> {
    planes: ArrayVec<Option<&'a mut [f32]>, MAX_PLANES>,
    frames: usize,
}

impl<'a> AudioPlanes<'a> {
    /// Build a view from plane slots and the host-reported frame count.
    ///
    /// Slots past `MAX_PLANES` are ignored. The frame count is clamped to
    /// the shortest present plane.
    pub fn from_planes<I>(planes: I, frames: usize) -> Self
    where
        I: IntoIterator<Item = Option<&'a mut [f32]>>,
    {
        let planes: ArrayVec<_, MAX_PLANES> = planes.into_iter().take(MAX_PLANES).collect();
        let frames = planes
            .iter()
            .flatten()
            .map(|p| p.len())
            .fold(frames, usize::min);
        Self { planes, frames }
    }

    /// Number of frames valid in every present plane.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of plane slots, present or not.
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Whether the plane at `ch` carries data.
    pub fn is_present(&self, ch: usize) -> bool {
        matches!(self.planes.get(ch), Some(Some(_)))
    }

    /// Read-only access to one plane, trimmed to `frames()`.
    pub fn plane(&self, ch: usize) -> Option<&[f32]> {
        let frames = self.frames;
        match self.planes.get(ch) {
            Some(Some(p)) => Some(&p[..frames]),
            _ => None,
        }
    }

    /// Mutable access to one plane, trimmed to `frames()`.
    pub fn plane_mut(&mut self, ch: usize) -> Option<&mut [f32]> {
        let frames = self.frames;
        match self.planes.get_mut(ch) {
            Some(Some(p)) => Some(&mut p[..frames]),
            _ => None,
        }
    }
}
