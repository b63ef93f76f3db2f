//! Append-only writes to the shared log file.
//!
//! The daemon never truncates or rewrites the log. Other producers may
//! append concurrently; no locking is taken on the log itself.

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Append an already-framed row to `path`, creating the file if needed.
pub fn append_encoded(path: &Path, encoded: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(encoded.as_bytes())?;
    file.flush()
}

/// Append a row that carries its own trailing terminator.
///
/// If the file's last line is not terminated (a log written with leading
/// framing), a `\n` is written first so the row starts on its own line.
pub fn append_terminated(path: &Path, encoded: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path)?;
    let row = if ends_unterminated(&mut file)? {
        format!("\n{encoded}")
    } else {
        encoded.to_string()
    };
    file.write_all(row.as_bytes())?;
    file.flush()
}

/// Whether a non-empty stream ends without a `\n`.
fn ends_unterminated<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    if reader.seek(SeekFrom::End(0))? == 0 {
        return Ok(false);
    }
    reader.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    reader.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
