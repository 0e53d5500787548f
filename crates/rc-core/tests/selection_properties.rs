//! Property tests for the selection policies and the history cap.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rc_core::selection::{draw_without_replacement, round_robin, single_draw};
use rc_core::{CallKind, HISTORY_CAPACITY, HistoryLog, Roster, RollCallError};

fn roster_strategy() -> impl Strategy<Value = Roster> {
    prop::collection::vec("[a-z]{1,6}", 1..20).prop_map(|names| {
        let mut r = Roster::new();
        r.set(names);
        r
    })
}

proptest! {
    #[test]
    fn prop_single_draw_is_member(roster in roster_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let name = single_draw(&roster, &mut rng).unwrap();
        prop_assert!(roster.contains(name));
    }

    #[test]
    fn prop_draw_without_replacement_distinct_members(
        roster in roster_strategy(),
        k_frac in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let k = ((roster.len() as f64 * k_frac).round() as usize).clamp(1, roster.len());
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = draw_without_replacement(&roster, k, &mut rng).unwrap();

        prop_assert_eq!(picked.len(), k);
        let unique: HashSet<_> = picked.iter().collect();
        prop_assert_eq!(unique.len(), k);
        for name in &picked {
            prop_assert!(roster.contains(name));
        }
    }

    #[test]
    fn prop_overdraw_fails(roster in roster_strategy(), extra in 1usize..5, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let k = roster.len() + extra;
        let result = draw_without_replacement(&roster, k, &mut rng);
        prop_assert_eq!(
            result,
            Err(RollCallError::InsufficientCandidates { requested: k, available: roster.len() })
        );
    }

    #[test]
    fn prop_round_robin_cycles(roster in roster_strategy(), start in 0usize..50) {
        let n = roster.len();
        for step in 0..(2 * n) {
            let expected = &roster.names()[(start + step) % n];
            prop_assert_eq!(round_robin(&roster, start + step).unwrap(), expected.as_str());
        }
    }

    #[test]
    fn prop_history_never_exceeds_capacity(appends in 0usize..250) {
        let mut log = HistoryLog::new();
        for i in 0..appends {
            log.append(format!("n{i}"), CallKind::Random);
        }
        prop_assert_eq!(log.len(), appends.min(HISTORY_CAPACITY));
        if appends > 0 {
            let newest = format!("n{}", appends - 1);
            prop_assert_eq!(&log.latest().unwrap().name, &newest);
            let expected: Vec<String> = (appends.saturating_sub(HISTORY_CAPACITY)..appends)
                .rev()
                .map(|i| format!("n{i}"))
                .collect();
            let actual: Vec<String> = log.iter().map(|r| r.name.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
