use std::collections::BTreeSet;

use hostpulse::system::volumes::VolumeProbe;

/// In-product code enumerates exactly once, at monitor startup; re-invoking
/// here is a test-only check that enumeration is a pure function of the
/// mounted-volume set.
#[test]
fn repeated_enumeration_is_idempotent() {
    let probe = VolumeProbe::new();
    let first = probe.enumerate();
    let second = probe.enumerate();

    assert_eq!(first.len(), second.len());
    let first_paths: BTreeSet<&str> = first.iter().map(|v| v.path.as_str()).collect();
    let second_paths: BTreeSet<&str> = second.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(first_paths, second_paths);
}

#[test]
fn enumerated_volumes_satisfy_capacity_invariants() {
    for volume in VolumeProbe::new().enumerate() {
        assert!(volume.capacity_gb > 0.0, "{}", volume.path);
        assert!(
            (0.0..=100.0).contains(&volume.percent_used),
            "{}: {}",
            volume.path,
            volume.percent_used
        );
        let sum = volume.used_space_gb() + volume.free_space_gb();
        assert!((sum - volume.capacity_gb).abs() < 1e-9, "{}", volume.path);
    }
}
