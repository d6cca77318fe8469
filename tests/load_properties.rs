use hostpulse::system::load::load_between;
use hostpulse::system::ticks::CpuTickSnapshot;
use proptest::prelude::*;

fn snapshot(user: u64, system: u64, idle: u64, nice: u64) -> CpuTickSnapshot {
    CpuTickSnapshot {
        user: user as f64,
        system: system as f64,
        idle: idle as f64,
        nice: nice as f64,
    }
}

proptest! {
    /// For monotonically advancing counters the load is always a percentage,
    /// never NaN, negative, or above 100.
    #[test]
    fn monotonic_pairs_stay_in_percentage_range(
        user in 0u64..10_000_000,
        system in 0u64..10_000_000,
        idle in 0u64..10_000_000,
        nice in 0u64..10_000_000,
        delta_user in 0u64..1_000_000,
        delta_system in 0u64..1_000_000,
        delta_idle in 0u64..1_000_000,
        delta_nice in 0u64..1_000_000,
    ) {
        let first = snapshot(user, system, idle, nice);
        let second = snapshot(
            user + delta_user,
            system + delta_system,
            idle + delta_idle,
            nice + delta_nice,
        );
        let load = load_between(&first, &second);
        prop_assert!(load.is_finite());
        prop_assert!((0.0..=100.0).contains(&load), "load out of range: {load}");
    }

    /// Nice ticks are sampled but do not participate in the load formula.
    #[test]
    fn nice_ticks_do_not_change_the_estimate(
        delta_user in 1u64..1_000_000,
        delta_idle in 1u64..1_000_000,
        delta_nice in 0u64..1_000_000,
    ) {
        let first = snapshot(0, 0, 0, 0);
        let without_nice = snapshot(delta_user, 0, delta_idle, 0);
        let with_nice = snapshot(delta_user, 0, delta_idle, delta_nice);
        prop_assert_eq!(
            load_between(&first, &without_nice),
            load_between(&first, &with_nice)
        );
    }
}
