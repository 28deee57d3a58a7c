//! Realtime processing engine for the rematrix filter.
//!
//! Routes each output channel from a selected input channel, applies a
//! per-channel gain, and accepts route/gain updates from other threads
//! without blocking the audio path.

mod filter;
mod gc;
mod processor;
mod scratch;
mod table;

pub use filter::{AudioFilter, FilterInfo};
pub use processor::{ChannelRemixProcessor, FILTER_ID, FILTER_NAME};
pub use table::{RemixHandle, RemixSnapshot};
