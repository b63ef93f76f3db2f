use std::time::Duration;

/// Interval between two periodic log rows.
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Sleep between two control loop iterations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Log file used when neither the config file nor the CLI names one.
pub const DEFAULT_LOG_FILE: &str = "GoodWe_database.csv";

/// Root of the Linux sysfs GPIO interface.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Field delimiter of the persisted log format.
pub const FIELD_DELIMITER: char = ';';

/// Quote wrapped around every field.
pub const FIELD_QUOTE: char = '"';

/// Encoded value of an active flag.
pub const ACTIVE_TOKEN: &str = "true";

/// Placeholder written in the active and subject fields of an override row.
pub const BLANK_PLACEHOLDER: &str = " ";

/// The reference deployment: six relays on a Raspberry Pi header.
pub mod reference {
    /// `(room, BCM line, physical header pin)` for each relay, in channel order.
    pub const CHANNELS: [(&str, u32, u32); 6] = [
        ("Kitchen", 26, 37),
        ("Living Room", 16, 36),
        ("Bedroom", 19, 35),
        ("Office", 13, 33),
        ("Restroom", 6, 31),
        ("DiningRoom", 12, 32),
    ];

    /// BCM line of the override input (physical header pin 7).
    pub const OVERRIDE_LINE: u32 = 4;
}
