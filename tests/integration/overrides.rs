//! Periodic logging: override rows, state rows, and the nothing-on case

use chrono::TimeDelta;
use std::fs;

use relaysync::codec::RowFraming;
use relaysync::gpio::Level;
use relaysync::models::LogRow;
use relaysync::periodic::Emission;

use super::helpers::*;

/// Override engaged at trigger time: blank row, whatever the relays say
#[test]
fn test_override_engaged_writes_blank_row() {
    let log = TestLog::new(Some("\n\"true\";\"Kitchen\";\"Mon\";\"14:30\""));
    let config = test_config(&log.path);
    let (mut control, gpio, clock) = start(&config, monday_at(14, 40));
    assert!(control.state().channels.get(0).unwrap().is_on);

    gpio.set_input(OVERRIDE_LINE, Level::Low);
    clock.advance(TimeDelta::minutes(30));
    let report = control.tick();

    assert_eq!(
        report.emission,
        Emission::Logged(LogRow::override_row("Mon", "15:00"))
    );
    assert!(log
        .content()
        .ends_with("\"Kitchen\";\"Mon\";\"14:30\"\n\" \";\" \";\"Mon\";\"15:00\""));
}

#[test]
fn test_state_row_uses_physical_label() {
    let log = TestLog::new(Some("\n\"true\";\"Bedroom\";\"Mon\";\"14:30\""));
    let config = test_config(&log.path);
    let (mut control, _gpio, clock) = start(&config, monday_at(14, 40));

    clock.advance(TimeDelta::minutes(35));
    let report = control.tick();

    assert_eq!(report.emission, Emission::Logged(LogRow::state(35, "Mon", "15:30")));
    assert!(log.content().ends_with("\n\"true\";\"35\";\"Mon\";\"15:30\""));
}

/// Nothing on and no override: the row is suppressed and the timer restarts
#[test]
fn test_nothing_on_suppresses_row() {
    let log = TestLog::new(Some("\n\" \";\" \";\"Mon\";\"14:00\""));
    let config = test_config(&log.path);
    let (mut control, _gpio, clock) = start(&config, monday_at(14, 10));
    let before = log.content();

    clock.advance(TimeDelta::minutes(30));
    assert_eq!(control.tick().emission, Emission::Suppressed);
    assert_eq!(log.content(), before);

    // Timer restarted at the suppressed firing
    clock.advance(TimeDelta::minutes(29));
    assert_eq!(control.tick().emission, Emission::NotDue);
    clock.advance(TimeDelta::minutes(1));
    assert_eq!(control.tick().emission, Emission::Suppressed);
}

#[test]
fn test_interval_is_level_triggered() {
    let log = TestLog::new(Some("\n\"true\";\"Office\";\"Mon\";\"08:00\""));
    let config = test_config(&log.path);
    let (mut control, _gpio, clock) = start(&config, monday_at(8, 0));

    // A poll that arrives late still fires once, then the timer restarts
    clock.advance(TimeDelta::minutes(47));
    assert_eq!(
        control.tick().emission,
        Emission::Logged(LogRow::state(33, "Mon", "09:00"))
    );
    assert_eq!(control.tick().emission, Emission::NotDue);
}

#[test]
fn test_trailing_framing_reads_back() {
    let log = TestLog::new(Some("\"true\";\"Office\";\"Mon\";\"08:00\"\n"));
    let mut config = test_config(&log.path);
    config.row_framing = RowFraming::Trailing;
    let (mut control, _gpio, clock) = start(&config, monday_at(8, 0));
    assert_eq!(control.state().channels.active_indices(), vec![3]);

    clock.advance(TimeDelta::minutes(30));
    control.tick();
    assert_eq!(
        log.content(),
        "\"true\";\"Office\";\"Mon\";\"08:00\"\n\"true\";\"33\";\"Mon\";\"08:30\"\n"
    );
    assert_eq!(
        relaysync::fs::last_line(&log.path).as_deref(),
        Some("\"true\";\"33\";\"Mon\";\"08:30\"")
    );
}

/// Switching an existing leading-framed log over to trailing framing
#[test]
fn test_trailing_framing_on_leading_log_keeps_rows_apart() {
    let log = TestLog::new(Some("\n\"true\";\"Office\";\"Mon\";\"08:00\""));
    let mut config = test_config(&log.path);
    config.row_framing = RowFraming::Trailing;
    let (mut control, _gpio, clock) = start(&config, monday_at(8, 0));

    clock.advance(TimeDelta::minutes(30));
    control.tick();
    assert_eq!(
        log.content(),
        "\n\"true\";\"Office\";\"Mon\";\"08:00\"\n\"true\";\"33\";\"Mon\";\"08:30\"\n"
    );
    assert_eq!(
        relaysync::fs::last_line(&log.path).as_deref(),
        Some("\"true\";\"33\";\"Mon\";\"08:30\"")
    );
}

/// A row that could not be appended stays due and lands once the log is back
#[test]
fn test_failed_append_is_retried_next_poll() {
    let log = TestLog::new(None);
    let log_dir = log.dir.path().join("share");
    let moved_dir = log.dir.path().join("share-away");
    fs::create_dir(&log_dir).unwrap();
    let log_path = log_dir.join("log.csv");
    fs::write(&log_path, "\n\"true\";\"Kitchen\";\"Mon\";\"14:30\"").unwrap();

    let config = test_config(&log_path);
    let (mut control, _gpio, clock) = start(&config, monday_at(14, 40));

    fs::rename(&log_dir, &moved_dir).unwrap();
    clock.advance(TimeDelta::minutes(30));
    assert!(matches!(control.tick().emission, Emission::WriteFailed(_)));

    fs::rename(&moved_dir, &log_dir).unwrap();
    clock.advance(TimeDelta::seconds(1));
    assert_eq!(
        control.tick().emission,
        Emission::Logged(LogRow::state(37, "Mon", "15:00"))
    );
    assert!(fs::read_to_string(&log_path)
        .unwrap()
        .ends_with("\n\"true\";\"37\";\"Mon\";\"15:00\""));

    // Timer restarted at the successful append
    clock.advance(TimeDelta::minutes(29));
    assert_eq!(control.tick().emission, Emission::NotDue);
}
