//! Deferred deallocation for scratch banks.
//!
//! Banks handed to the audio path are wrapped in `basedrop::Owned`. When the
//! audio path replaces one, the drop only enqueues the allocation; the memory
//! is released later on a dedicated collector thread.

use std::sync::mpsc;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use basedrop::{Collector, Handle};

/// How often the collector thread frees queued allocations.
const COLLECT_INTERVAL: Duration = Duration::from_millis(50);

static GC_HANDLE: OnceLock<Handle> = OnceLock::new();

fn init_gc() -> Handle {
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("rematrix-gc".to_string())
        .spawn(move || {
            // Collector is !Sync, so it lives on this thread only.
            let mut collector = Collector::new();
            if tx.send(collector.handle()).is_err() {
                return;
            }
            log::info!("rematrix: GC thread started");
            loop {
                collector.collect();
                thread::sleep(COLLECT_INTERVAL);
            }
        });

    let handle = match spawned {
        Ok(_) => rx.recv().ok(),
        Err(err) => {
            log::error!("rematrix: failed to spawn GC thread: {}", err);
            None
        }
    };

    handle.unwrap_or_else(|| {
        // No collector thread: queued banks are never freed, but dropping
        // on the audio path stays allocation-free.
        log::warn!("rematrix: retired scratch banks will not be reclaimed");
        Box::leak(Box::new(Collector::new())).handle()
    })
}

/// Handle for wrapping values in `Owned<T>` / `Shared<T>`.
pub(crate) fn gc_handle() -> Handle {
    GC_HANDLE.get_or_init(init_gc).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use basedrop::Owned;

    #[test]
    fn handle_is_shared_across_calls() {
        let a = Owned::new(&gc_handle(), vec![1.0f32; 16]);
        let b = Owned::new(&gc_handle(), vec![2.0f32; 16]);
        assert_eq!(a[0] + b[0], 3.0);
        drop(a);
        drop(b);
    }
}
