//! Control loop over a fake sysfs GPIO tree

use std::fs;
use std::path::Path;

use relaysync::daemon::ControlLoop;
use relaysync::gpio::{create_backend, BackendType};
use relaysync::time::ManualClock;

use super::helpers::*;

fn fake_sysfs(root: &Path, lines: &[u32]) {
    fs::create_dir_all(root).unwrap();
    fs::write(root.join("export"), "").unwrap();
    for line in lines {
        let dir = root.join(format!("gpio{line}"));
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("direction"), "in").unwrap();
        fs::write(dir.join("value"), "1").unwrap();
    }
}

fn value(root: &Path, line: u32) -> String {
    fs::read_to_string(root.join(format!("gpio{line}")).join("value")).unwrap()
}

fn direction(root: &Path, line: u32) -> String {
    fs::read_to_string(root.join(format!("gpio{line}")).join("direction")).unwrap()
}

#[test]
fn test_startup_drives_sysfs_lines() {
    let log = TestLog::new(Some("\n\"true\";\"Living Room\";\"Mon\";\"14:30\""));
    let sysfs_root = log.dir.path().join("gpio");
    let mut config = test_config(&log.path);
    config.gpio.backend = BackendType::Sysfs;
    config.gpio.sysfs_root = sysfs_root.clone();

    let mut lines: Vec<u32> = config.channels.iter().map(|c| c.line).collect();
    lines.push(config.override_line);
    fake_sysfs(&sysfs_root, &lines);

    let gpio = create_backend(config.gpio.backend, &config.gpio.sysfs_root);
    let control =
        ControlLoop::start(&config, gpio, ManualClock::new(monday_at(14, 40))).unwrap();

    assert_eq!(control.state().channels.active_indices(), vec![1]);
    assert_eq!(value(&sysfs_root, 16), "1");
    for line in [26, 19, 13, 6, 12] {
        assert_eq!(value(&sysfs_root, line), "0", "line {line}");
        assert_eq!(direction(&sysfs_root, line), "out");
    }
    assert_eq!(direction(&sysfs_root, config.override_line), "in");
}

#[test]
fn test_missing_sysfs_is_fatal_at_startup() {
    let log = TestLog::new(None);
    let mut config = test_config(&log.path);
    config.gpio.backend = BackendType::Sysfs;
    config.gpio.sysfs_root = log.dir.path().join("no-such-gpio");

    let gpio = create_backend(config.gpio.backend, &config.gpio.sysfs_root);
    let result = ControlLoop::start(&config, gpio, ManualClock::new(monday_at(9, 0)));
    assert!(result.is_err());
}
