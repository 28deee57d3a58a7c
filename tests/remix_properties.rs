//! Property tests for the remix laws: routing, muting, and block-size
//! independence.

use proptest::prelude::*;
use rmx_core::{db_to_mul, AudioPlanes, Route, MAX_PLANES};
use rmx_engine::ChannelRemixProcessor;

fn input(channels: usize, frames: usize, seed: u32) -> Vec<Vec<f32>> {
    (0..channels)
        .map(|ch| {
            (0..frames)
                .map(|i| {
                    let x = (i as u32).wrapping_mul(2654435761).wrapping_add(seed ^ (ch as u32 * 97));
                    (x % 2001) as f32 / 1000.0 - 1.0
                })
                .collect()
        })
        .collect()
}

fn process_in_blocks(processor: &mut ChannelRemixProcessor, planes: &mut [Vec<f32>], block: usize) {
    let frames = planes.first().map_or(0, |p| p.len());
    let mut start = 0;
    while start < frames {
        let end = (start + block).min(frames);
        let mut view =
            AudioPlanes::from_planes(planes.iter_mut().map(|p| Some(&mut p[start..end])), end - start);
        let len = view.frames();
        processor.process(&mut view, len);
        start = end;
    }
}

prop_compose! {
    fn remix_case()(channels in 1..=MAX_PLANES)
        (channels in Just(channels),
         routes in prop::collection::vec(-3i64..12, channels),
         gains in prop::collection::vec(-30.0f32..30.0, channels),
         frames in 0usize..3000,
         seed in any::<u32>())
        -> (usize, Vec<i64>, Vec<f32>, usize, u32)
    {
        (channels, routes, gains, frames, seed)
    }
}

proptest! {
    #[test]
    fn output_is_routed_input_times_gain((channels, routes, gains, frames, seed) in remix_case()) {
        let routes: Vec<Route> = routes.into_iter().map(Route).collect();
        let mut processor = ChannelRemixProcessor::new(channels, &routes, &gains);
        let original = input(channels, frames, seed);
        let mut planes = original.clone();
        process_in_blocks(&mut processor, &mut planes, frames.max(1));

        for ch in 0..channels {
            let gain = db_to_mul(gains[ch]);
            match routes[ch].source(channels) {
                Some(src) => {
                    for (out, &x) in planes[ch].iter().zip(&original[src]) {
                        prop_assert_eq!(*out, x * gain);
                    }
                }
                None => prop_assert!(planes[ch].iter().all(|&s| s == 0.0)),
            }
        }
    }

    #[test]
    fn block_size_does_not_change_output(
        (channels, routes, gains, frames, seed) in remix_case(),
        block in 1usize..2500,
    ) {
        let routes: Vec<Route> = routes.into_iter().map(Route).collect();
        let mut whole = input(channels, frames, seed);
        let mut chunked = whole.clone();

        let mut a = ChannelRemixProcessor::new(channels, &routes, &gains);
        process_in_blocks(&mut a, &mut whole, frames.max(1));
        let mut b = ChannelRemixProcessor::new(channels, &routes, &gains);
        process_in_blocks(&mut b, &mut chunked, block);

        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn muted_outputs_are_zero_at_any_gain(
        channels in 1..=MAX_PLANES,
        gain_db in -1000.0f32..1000.0,
        frames in 1usize..1500,
        seed in any::<u32>(),
    ) {
        let routes = [Route::MUTE; MAX_PLANES];
        let mut processor = ChannelRemixProcessor::new(channels, &routes, &[gain_db; MAX_PLANES]);
        let mut planes = input(channels, frames, seed);
        process_in_blocks(&mut processor, &mut planes, frames);

        for plane in &planes {
            prop_assert!(plane.iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn planes_past_channel_count_are_untouched(
        channels in 1usize..MAX_PLANES,
        frames in 1usize..600,
        seed in any::<u32>(),
    ) {
        let routes: Vec<Route> = (0..MAX_PLANES as i64).rev().map(Route).collect();
        let mut processor = ChannelRemixProcessor::new(channels, &routes, &[-6.0; MAX_PLANES]);
        let original = input(MAX_PLANES, frames, seed);
        let mut planes = original.clone();
        process_in_blocks(&mut processor, &mut planes, frames);

        prop_assert_eq!(&planes[channels..], &original[channels..]);
    }
}
