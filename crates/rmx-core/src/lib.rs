//! Core types for the rematrix filter.
//!
//! This crate defines the planar buffer types, gain math, route
//! convention and settings key scheme shared by the processing engine
//! and the host controller.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod audio_buffer;
mod audio_planes;
pub mod gain;
mod route;
pub mod settings;

pub use audio_buffer::{AudioBuffer, MAX_PLANES, QUANTUM_FRAMES};
pub use audio_planes::AudioPlanes;
pub use gain::{db_to_mul, mul_to_db};
pub use route::Route;
pub use settings::{RemixSettings, SettingValue, SettingsError, SettingsMap};
