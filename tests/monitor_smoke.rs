use std::time::Duration;

use hostpulse::{Monitor, MonitorConfig, MonitorPhase};

fn fast_config() -> MonitorConfig {
    MonitorConfig {
        sample_interval: Duration::from_millis(30),
        load_window: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn monitor_reaches_running_and_publishes_samples() {
    let monitor = Monitor::spawn(fast_config());
    let mut state = monitor.state();

    tokio::time::timeout(Duration::from_secs(10), async {
        while state.borrow_and_update().phase != MonitorPhase::Running {
            state.changed().await.unwrap();
        }
        // The next publish after Running carries the first sample outcome.
        state.changed().await.unwrap();
    })
    .await
    .expect("monitor never produced a sample");

    let snapshot = monitor.latest();
    assert_eq!(snapshot.phase, MonitorPhase::Running);
    assert!(snapshot.core_count >= 1);
    assert!(snapshot.cpu_load_percent.is_finite());
    assert!((0.0..=100.0).contains(&snapshot.cpu_load_percent));
    assert!(snapshot.memory_total_gb > 0.0);
    assert!(snapshot.memory_used_gb > 0.0);
    assert!(snapshot.memory_used_gb <= snapshot.memory_total_gb);
    assert_eq!(snapshot.is_aarch64, cfg!(target_arch = "aarch64"));
}

#[tokio::test]
async fn volumes_are_enumerated_once_at_startup() {
    let monitor = Monitor::spawn(fast_config());
    let mut state = monitor.state();

    tokio::time::timeout(Duration::from_secs(10), async {
        while state.borrow_and_update().phase != MonitorPhase::Running {
            state.changed().await.unwrap();
        }
    })
    .await
    .expect("monitor never finished initializing");

    let at_startup = monitor.latest().volumes;
    for volume in &at_startup {
        assert!(!volume.path.contains("/System"));
        assert!(volume.capacity_gb > 0.0);
        assert!((0.0..=100.0).contains(&volume.percent_used));
    }

    // Later samples overwrite load and memory but never the volume list.
    tokio::time::timeout(Duration::from_secs(10), state.changed())
        .await
        .expect("no sample published")
        .unwrap();
    assert_eq!(monitor.latest().volumes, at_startup);
}

#[tokio::test]
async fn dropping_the_monitor_stops_publishing() {
    let monitor = Monitor::spawn(fast_config());
    let mut state = monitor.state();
    drop(monitor);

    // The driver task is aborted; once its sender drops, changed() errors.
    tokio::time::timeout(Duration::from_secs(10), async {
        while state.changed().await.is_ok() {}
    })
    .await
    .expect("watch channel never closed after drop");
}
