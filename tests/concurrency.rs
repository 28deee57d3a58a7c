//! Control-thread updates racing the audio path.
//!
//! A control thread keeps reconfiguring routes and the channel count while
//! the test thread processes buffers. Every input plane holds a constant
//! value, so each processed output plane must be constant too (one table
//! snapshot per call) and carry either silence or some input's value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use rmx_core::{AudioPlanes, Route, MAX_PLANES, QUANTUM_FRAMES};
use rmx_engine::ChannelRemixProcessor;

const FRAMES: usize = QUANTUM_FRAMES + 300;

fn input_value(ch: usize) -> f32 {
    (ch + 1) as f32
}

#[test]
fn process_sees_consistent_tables_during_reconfiguration() {
    let mut processor = ChannelRemixProcessor::new(2, &[Route(0), Route(1)], &[]);
    let handle = processor.handle();
    let done = Arc::new(AtomicBool::new(false));

    let control = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut step = 0i64;
            while !done.load(Ordering::Relaxed) {
                let channels = (step as usize % MAX_PLANES) + 1;
                let routes: Vec<Route> = (0..MAX_PLANES as i64)
                    .map(|ch| Route((ch + step) % (MAX_PLANES as i64 + 2) - 1))
                    .collect();
                handle.configure(channels, &routes, &[0.0; MAX_PLANES]);
                step += 1;
            }
            step
        })
    };

    let mut planes = vec![vec![0.0f32; FRAMES]; MAX_PLANES];
    for _ in 0..2_000 {
        for (ch, plane) in planes.iter_mut().enumerate() {
            plane.fill(input_value(ch));
        }
        {
            let mut view = AudioPlanes::from_planes(planes.iter_mut().map(|p| Some(&mut p[..])), FRAMES);
            processor.process(&mut view, FRAMES);
        }

        for plane in &planes {
            let first = plane[0];
            assert!(plane.iter().all(|&s| s == first), "output plane changed mid-call");
            assert!(
                first == 0.0 || (1..=MAX_PLANES).any(|ch| first == input_value(ch - 1)),
                "unexpected sample {}",
                first
            );
        }
    }

    done.store(true, Ordering::Relaxed);
    let updates = control.join().unwrap();
    assert!(updates > 0);
}

#[test]
fn handle_is_usable_from_many_threads() {
    let mut processor = ChannelRemixProcessor::new(4, &[], &[]);
    let workers: Vec<_> = (0..4)
        .map(|i| {
            let handle = processor.handle();
            thread::spawn(move || {
                for n in 0..200 {
                    let channels = 1 + (i + n) % MAX_PLANES;
                    handle.configure(channels, &[Route(i as i64)], &[-(n as f32 % 30.0)]);
                }
            })
        })
        .collect();

    let mut planes = vec![vec![0.5f32; 64]; MAX_PLANES];
    for _ in 0..500 {
        let mut view = AudioPlanes::from_planes(planes.iter_mut().map(|p| Some(&mut p[..])), 64);
        processor.process(&mut view, 64);
    }
    for worker in workers {
        worker.join().unwrap();
    }

    // Settle on the last staged bank.
    let final_channels = processor.channels();
    let mut view = AudioPlanes::from_planes(planes.iter_mut().map(|p| Some(&mut p[..])), 64);
    processor.process(&mut view, 64);
    assert!((1..=MAX_PLANES).contains(&final_channels));
    assert!(processor.snapshot().gains.iter().all(|g| g.is_finite() && *g <= 1.0));
}
