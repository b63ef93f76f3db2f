//! Last-row retrieval for append-only line files.
//!
//! The file is scanned backward from its end, so the cost of a read is
//! bounded by the length of the final row rather than by the size of the log.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

/// Bytes read per backward step.
const SCAN_CHUNK: usize = 256;

/// Last non-empty line of `path`.
///
/// Returns `None` when the file is missing, unreadable, empty, or holds only
/// line terminators.
pub fn last_line(path: &Path) -> Option<String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "log file not readable");
            return None;
        }
    };
    match read_last_line(&mut file) {
        Ok(line) => line,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to read last line");
            None
        }
    }
}

/// Last non-empty line of a seekable stream, without its terminator.
///
/// Trailing `\n`/`\r` bytes are skipped first, then the scan continues
/// backward until the previous `\n` or the start of the stream. Only the
/// bytes of that final line are read forward.
pub fn read_last_line<R: Read + Seek>(reader: &mut R) -> io::Result<Option<String>> {
    let end = reader.seek(SeekFrom::End(0))?;
    if end == 0 {
        return Ok(None);
    }

    let mut buf = [0u8; SCAN_CHUNK];
    let mut pos = end;
    let mut content_end: Option<u64> = None;
    let mut start = 0u64;

    'scan: while pos > 0 {
        let len = pos.min(SCAN_CHUNK as u64) as usize;
        pos -= len as u64;
        reader.seek(SeekFrom::Start(pos))?;
        reader.read_exact(&mut buf[..len])?;

        for (i, &byte) in buf[..len].iter().enumerate().rev() {
            let at = pos + i as u64;
            match content_end {
                None if byte != b'\n' && byte != b'\r' => content_end = Some(at + 1),
                None => {}
                Some(_) if byte == b'\n' => {
                    start = at + 1;
                    break 'scan;
                }
                Some(_) => {}
            }
        }
    }

    let Some(content_end) = content_end else {
        return Ok(None);
    };

    reader.seek(SeekFrom::Start(start))?;
    let mut line = vec![0u8; (content_end - start) as usize];
    reader.read_exact(&mut line)?;

    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}
