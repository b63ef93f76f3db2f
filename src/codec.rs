//! Text encoding of log rows.
//!
//! A row is four quote-wrapped fields separated by semicolons:
//!
//! ```text
//! "true";"Kitchen";"Mon";"14:30"
//! " ";" ";"Mon";"15:00"
//! ```
//!
//! The second form is an override row. Rows written by this daemon carry a
//! physical pin label as the subject; rows written by other producers carry
//! a room name.

use serde::Deserialize;

use crate::models::constants::{ACTIVE_TOKEN, BLANK_PLACEHOLDER, FIELD_DELIMITER, FIELD_QUOTE};
use crate::models::LogRow;

/// Where the line terminator goes relative to an appended row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowFraming {
    /// `\n` before each row. The historical on-disk layout.
    #[default]
    Leading,
    /// `\n` after each row.
    Trailing,
}

/// Parse one log line.
///
/// Returns `None` when the line has fewer than two fields. The active flag
/// is set only by an exact `"true"` first field; anything else, including a
/// half-written or garbled field, reads as inactive.
pub fn decode(line: &str) -> Option<LogRow> {
    let mut fields = line.split(FIELD_DELIMITER);
    let first = fields.next()?;
    let subject = fields.next()?;

    let active = unquote(first) == ACTIVE_TOKEN && first.len() == ACTIVE_TOKEN.len() + 2;

    Some(LogRow {
        active,
        subject: unquote(subject).to_string(),
        day: fields.next().map(unquote).unwrap_or_default().to_string(),
        time: fields.next().map(unquote).unwrap_or_default().to_string(),
    })
}

/// Render `row` with the given framing, ready to append.
pub fn encode(row: &LogRow, framing: RowFraming) -> String {
    let (active, subject) = if row.active {
        (ACTIVE_TOKEN, row.subject.as_str())
    } else {
        (BLANK_PLACEHOLDER, BLANK_PLACEHOLDER)
    };

    let body = [active, subject, row.day.as_str(), row.time.as_str()]
        .iter()
        .map(|field| format!("{FIELD_QUOTE}{field}{FIELD_QUOTE}"))
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string());

    match framing {
        RowFraming::Leading => format!("\n{body}"),
        RowFraming::Trailing => format!("{body}\n"),
    }
}

fn unquote(field: &str) -> &str {
    field
        .strip_prefix(FIELD_QUOTE)
        .and_then(|f| f.strip_suffix(FIELD_QUOTE))
        .unwrap_or(field)
}
