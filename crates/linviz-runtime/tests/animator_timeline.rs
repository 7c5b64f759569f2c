#![forbid(unsafe_code)]

//! Timeline tests for the mutation animator on the virtual clock.
//!
//! | Property                                                        |
//! |-----------------------------------------------------------------|
//! | Commits fire exactly once, in deadline order, ties in start order |
//! | Tick granularity does not change which commits fire or their order |
//! | Progress is monotone within one sweep and ends at exactly 1.0     |

use std::time::Duration;

use linviz_runtime::{AnimatorConfig, MutationAnimator, TimerQueue};
use proptest::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Drive `anim` with `steps` and collect every commit that fired.
fn run(anim: &mut MutationAnimator<usize>, steps: &[u64]) -> Vec<usize> {
    steps.iter().flat_map(|&s| anim.tick(ms(s))).collect()
}

proptest! {
    #[test]
    fn granularity_does_not_change_firing(
        delays in proptest::collection::vec(0u64..1000, 1..20),
        steps in proptest::collection::vec(1u64..120, 1..200),
    ) {
        let mut coarse = MutationAnimator::new(AnimatorConfig::default());
        let mut fine = MutationAnimator::new(AnimatorConfig::default());
        for (i, d) in delays.iter().enumerate() {
            coarse.start(i, i, ms(*d));
            fine.start(i, i, ms(*d));
        }
        let total: u64 = steps.iter().sum::<u64>() + 1000;
        let fired_fine = run(&mut fine, &vec![1; total as usize]);
        let mut fired_coarse = run(&mut coarse, &steps);
        fired_coarse.extend(coarse.tick(ms(1000)));

        prop_assert_eq!(&fired_fine, &fired_coarse);
        prop_assert_eq!(fired_fine.len(), delays.len());

        let mut expected: Vec<usize> = (0..delays.len()).collect();
        expected.sort_by_key(|&i| (delays[i], i));
        prop_assert_eq!(fired_fine, expected);
    }

    #[test]
    fn progress_is_monotone(steps in proptest::collection::vec(1u64..80, 1..40)) {
        let mut anim: MutationAnimator<()> = MutationAnimator::new(AnimatorConfig::default());
        anim.start(0, (), ms(600));
        let mut last = 0.0f32;
        for s in steps {
            anim.tick(ms(s));
            let p = anim.state().progress;
            prop_assert!(p >= last);
            prop_assert!((0.0..=1.0).contains(&p));
            last = p;
        }
        anim.tick(ms(500));
        prop_assert_eq!(anim.state().progress, 1.0);
        prop_assert!(!anim.state().running);
    }

    #[test]
    fn cancelled_timers_never_fire(
        delays in proptest::collection::vec(0u64..500, 1..16),
        cancel_mask in proptest::collection::vec(any::<bool>(), 16),
    ) {
        let mut q = TimerQueue::new();
        let tickets: Vec<_> = delays.iter().enumerate().map(|(i, d)| q.schedule(ms(*d), i)).collect();
        let mut kept = Vec::new();
        for (i, t) in tickets.into_iter().enumerate() {
            if cancel_mask[i] {
                prop_assert_eq!(q.cancel(t), Some(i));
            } else {
                kept.push(i);
            }
        }
        let mut fired = q.advance(ms(500));
        fired.sort_unstable();
        prop_assert_eq!(fired, kept);
    }
}

#[test]
fn sixty_fps_insert_timeline() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("linviz_runtime=debug")
        .try_init();

    let cfg = AnimatorConfig::default();
    let mut anim = MutationAnimator::new(cfg);
    anim.start(0, "settle", cfg.settle_delay);

    let frame = Duration::from_micros(16_667);
    let mut frames_until_still = 0;
    while anim.state().running {
        assert!(anim.tick(frame).is_empty());
        frames_until_still += 1;
    }
    assert_eq!(frames_until_still, 30);

    let mut fired = Vec::new();
    while fired.is_empty() {
        fired = anim.tick(frame);
    }
    assert_eq!(fired, vec!["settle"]);
    assert!(!anim.is_busy());
}
