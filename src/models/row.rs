use std::fmt;

use super::constants::BLANK_PLACEHOLDER;

/// One line of the persisted log.
///
/// The subject is a room name on rows written by other producers and a
/// physical pin label on rows this daemon writes. An inactive row is an
/// override row: its active and subject fields are blank placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub active: bool,
    pub subject: String,
    /// Three-letter weekday abbreviation.
    pub day: String,
    /// `HH:MM`, quantized to `:00` or `:30`.
    pub time: String,
}

impl LogRow {
    /// Row recording that the relay labelled `label` is on.
    pub fn state(label: u32, day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            active: true,
            subject: label.to_string(),
            day: day.into(),
            time: time.into(),
        }
    }

    /// Row recording that the override signal was engaged.
    pub fn override_row(day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            active: false,
            subject: BLANK_PLACEHOLDER.to_string(),
            day: day.into(),
            time: time.into(),
        }
    }

    pub fn is_override(&self) -> bool {
        !self.active
    }
}

impl fmt::Display for LogRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.active {
            write!(f, "{} on {} {}", self.subject, self.day, self.time)
        } else {
            write!(f, "override on {} {}", self.day, self.time)
        }
    }
}
