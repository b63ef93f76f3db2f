//! Startup replay of the last log row and change-driven resync

use relaysync::gpio::Level;
use relaysync::sync::SyncOutcome;

use super::helpers::*;

/// The last row names Kitchen: Kitchen goes high, everything else stays low
#[test]
fn test_startup_sync_raises_named_room_only() {
    let log = TestLog::new(Some(
        "\n\"true\";\"Office\";\"Mon\";\"14:00\"\n\"true\";\"Kitchen\";\"Mon\";\"14:30\"",
    ));
    let config = test_config(&log.path);
    let (control, gpio, _clock) = start(&config, monday_at(14, 40));

    let channels = &control.state().channels;
    assert_eq!(channels.active_indices(), vec![0]);
    assert!(channels.get(0).unwrap().is_on);
    assert_eq!(gpio.output(26), Some(Level::High));
    for channel in config.channels.iter().skip(1) {
        assert_eq!(gpio.output(channel.line), Some(Level::Low), "{}", channel.room);
    }
}

#[test]
fn test_startup_with_missing_log_leaves_all_low() {
    let log = TestLog::new(None);
    let config = test_config(&log.path);
    let (control, gpio, _clock) = start(&config, monday_at(9, 0));

    assert!(control.state().channels.active_indices().is_empty());
    assert!(gpio.writes().is_empty());
    assert!(control.state().last_observed_mod_time().is_none());
}

#[test]
fn test_startup_with_override_tail_leaves_all_low() {
    let log = TestLog::new(Some("\n\" \";\" \";\"Mon\";\"14:30\""));
    let config = test_config(&log.path);
    let (control, gpio, _clock) = start(&config, monday_at(14, 40));

    assert!(control.state().channels.active_indices().is_empty());
    assert!(gpio.writes().is_empty());
}

#[test]
fn test_external_append_triggers_resync() {
    let log = TestLog::new(Some("\n\"true\";\"Kitchen\";\"Mon\";\"14:30\""));
    let config = test_config(&log.path);
    let (mut control, gpio, _clock) = start(&config, monday_at(14, 40));

    assert_eq!(control.tick().synced, None);

    log.append_external("\n\"true\";\"Restroom\";\"Mon\";\"15:00\"");
    let report = control.tick();
    assert_eq!(report.synced, Some(SyncOutcome::Activated { index: 4 }));
    assert_eq!(gpio.output(6), Some(Level::High));

    // No further change, no further sync
    assert_eq!(control.tick().synced, None);
}

#[test]
fn test_log_created_after_startup_is_picked_up() {
    let log = TestLog::new(None);
    let config = test_config(&log.path);
    let (mut control, gpio, _clock) = start(&config, monday_at(10, 0));

    log.append_external("\"true\";\"DiningRoom\";\"Mon\";\"10:00\"");
    let report = control.tick();
    assert_eq!(report.synced, Some(SyncOutcome::Activated { index: 5 }));
    assert_eq!(gpio.output(12), Some(Level::High));
}

#[test]
fn test_corrupt_tail_is_a_no_op() {
    let log = TestLog::new(Some("\n\"true\";\"Kitchen\";\"Mon\";\"14:30\""));
    let config = test_config(&log.path);
    let (mut control, gpio, _clock) = start(&config, monday_at(14, 40));
    let writes_before = gpio.writes();

    // Half-written row from a concurrent producer
    log.append_external("\n\"tr");
    let report = control.tick();
    assert_eq!(report.synced, Some(SyncOutcome::NoRow));
    assert_eq!(gpio.writes(), writes_before);
    assert_eq!(control.state().channels.active_indices(), vec![0]);
}
