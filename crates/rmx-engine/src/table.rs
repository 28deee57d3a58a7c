//! Route/gain table shared between the control path and the audio path.
//!
//! Every route and gain is its own atomic cell. The audio path only loads;
//! the control path only stores. A scratch bank for a new channel count is
//! built on the control path and parked in a slot for the audio path to
//! adopt at the start of its next call. The bank it replaces is dropped on
//! the audio path and freed by the collector thread.

use std::sync::atomic::{AtomicI64, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use basedrop::{Handle, Owned};
use parking_lot::Mutex;
use rmx_core::{db_to_mul, RemixSettings, Route, MAX_PLANES};

use crate::gc::gc_handle;
use crate::scratch::ScratchBank;

/// Route/gain values as seen by one `process` call.
///
/// Routes are validated against the channel count of the scratch bank the
/// call runs with, not the last configured count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemixSnapshot {
    pub routes: [Route; MAX_PLANES],
    pub gains: [f32; MAX_PLANES],
}

pub(crate) struct RemixTable {
    routes: [AtomicI64; MAX_PLANES],
    gains: [AtomicU32; MAX_PLANES],
    channels: AtomicUsize,
    incoming: Mutex<Option<Owned<ScratchBank>>>,
    gc: Handle,
}

impl RemixTable {
    pub(crate) fn new() -> Self {
        Self {
            routes: std::array::from_fn(|ch| AtomicI64::new(Route::identity(ch).0)),
            gains: std::array::from_fn(|_| AtomicU32::new(1.0f32.to_bits())),
            channels: AtomicUsize::new(0),
            incoming: Mutex::new(None),
            gc: gc_handle(),
        }
    }

    pub(crate) fn channels(&self) -> usize {
        self.channels.load(Ordering::Acquire)
    }

    pub(crate) fn route(&self, ch: usize) -> Route {
        Route(self.routes[ch].load(Ordering::Relaxed))
    }

    pub(crate) fn gain(&self, ch: usize) -> f32 {
        f32::from_bits(self.gains[ch].load(Ordering::Relaxed))
    }

    pub(crate) fn snapshot(&self) -> RemixSnapshot {
        RemixSnapshot {
            routes: std::array::from_fn(|ch| self.route(ch)),
            gains: std::array::from_fn(|ch| self.gain(ch)),
        }
    }

    /// Wrap a bank for the audio path.
    pub(crate) fn own_bank(&self, bank: ScratchBank) -> Owned<ScratchBank> {
        Owned::new(&self.gc, bank)
    }

    /// Store routes and gains, and stage a new scratch bank when the channel
    /// count changed. Entries past the end of `routes` / `gains_db` keep
    /// their current values.
    ///
    /// Returns the number of cells whose value changed.
    pub(crate) fn configure(&self, channels: usize, routes: &[Route], gains_db: &[f32]) -> usize {
        let channels = channels.clamp(1, MAX_PLANES);
        let mut changed = 0;

        for (ch, route) in routes.iter().take(MAX_PLANES).enumerate() {
            if self.routes[ch].swap(route.0, Ordering::Relaxed) != route.0 {
                log::debug!("rematrix: route {} -> {}", ch, route.0);
                changed += 1;
            }
        }
        for (ch, &db) in gains_db.iter().take(MAX_PLANES).enumerate() {
            let bits = db_to_mul(db).to_bits();
            if self.gains[ch].swap(bits, Ordering::Relaxed) != bits {
                log::debug!("rematrix: gain {} -> {} dB", ch, db);
                changed += 1;
            }
        }

        // Count and staged bank change together, so racing configures
        // cannot leave a bank for a stale count in the slot.
        let stale = {
            let mut slot = self.incoming.lock();
            let previous = self.channels.swap(channels, Ordering::AcqRel);
            if previous == channels {
                None
            } else {
                log::info!("rematrix: channel count {} -> {}", previous, channels);
                slot.replace(self.own_bank(ScratchBank::new(channels)))
            }
        };
        drop(stale);

        changed
    }

    /// Swap a staged bank into `current`.
    ///
    /// Never blocks: if the control path holds the slot, the bank is picked
    /// up on a later call. The replaced bank is queued for the collector.
    pub(crate) fn adopt_bank(&self, current: &mut Owned<ScratchBank>) {
        let incoming = match self.incoming.try_lock() {
            Some(mut slot) => slot.take(),
            None => None,
        };
        if let Some(bank) = incoming {
            *current = bank;
        }
    }

    #[cfg(test)]
    fn has_incoming(&self) -> bool {
        self.incoming.lock().is_some()
    }
}

/// Cloneable control handle onto a processor's route/gain table.
///
/// Safe to use from any thread while the processor runs on the audio
/// thread.
#[derive(Clone)]
pub struct RemixHandle {
    pub(crate) table: Arc<RemixTable>,
}

impl RemixHandle {
    /// Store new routes and dB gains for `channels` active channels.
    pub fn configure(&self, channels: usize, routes: &[Route], gains_db: &[f32]) {
        let changed = self.table.configure(channels, routes, gains_db);
        if changed > 0 {
            log::debug!("rematrix: {} route/gain cells updated", changed);
        }
    }

    /// Apply typed settings for `channels` active channels.
    pub fn configure_settings(&self, channels: usize, settings: &RemixSettings) {
        let gains_db: [f32; MAX_PLANES] = std::array::from_fn(|ch| settings.gains_db[ch] as f32);
        self.configure(channels, &settings.routes, &gains_db);
    }

    /// Active channel count as last configured.
    pub fn channels(&self) -> usize {
        self.table.channels()
    }

    /// Current route/gain values.
    pub fn snapshot(&self) -> RemixSnapshot {
        self.table.snapshot()
    }
}
