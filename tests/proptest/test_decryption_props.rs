//! Property-based tests for the decryption animator

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use santaterm::sequence::decryption::LOG_CAPACITY;
use santaterm::sequence::{DecryptionAnimator, DecryptionView, Tick};

proptest! {
    #[test]
    fn test_run_completes_exactly_once(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut animator = DecryptionAnimator::new();
        let mut last = 0.0;
        let mut finished = 0;

        for _ in 0..150 {
            match animator.tick(&mut rng) {
                Tick::Advanced { progress } => {
                    prop_assert!(progress > last);
                    prop_assert!(progress <= 100.0);
                    last = progress;
                }
                Tick::Finished => finished += 1,
                Tick::Idle => {}
            }
            prop_assert!(animator.view().log.len() <= LOG_CAPACITY);
        }

        prop_assert_eq!(finished, 1);
        prop_assert!(animator.view().is_complete());
    }

    #[test]
    fn test_progress_bar_fill(progress in 0.0f64..=100.0, width in 1usize..60) {
        let view = DecryptionView { progress, log: Vec::new() };
        let bar = view.progress_bar(width);

        let filled = bar.chars().filter(|c| *c == '=').count();
        let empty = bar.chars().filter(|c| *c == '-').count();
        prop_assert_eq!(filled + empty, width);
        prop_assert_eq!(filled, ((progress / 100.0) * width as f64).floor() as usize);
        let suffix = format!("] {}%", view.percent());
        prop_assert!(bar.ends_with(&suffix));
    }
}
