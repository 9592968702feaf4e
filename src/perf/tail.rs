use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

/// Read the final line of a (possibly large) output file without loading
/// the whole file.
///
/// Walks backward from the end one byte at a time until the newline that
/// precedes the last line. A single trailing newline is ignored, and the
/// returned line has its terminator stripped.
pub fn read_last_line(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let len = file
        .seek(SeekFrom::End(0))
        .map_err(|e| Error::io(path, e))?;

    let mut byte = [0u8; 1];
    let mut start = 0;
    // Skip the terminator of the last line itself
    let mut pos = len.saturating_sub(1);
    while pos > 0 {
        pos -= 1;
        file.seek(SeekFrom::Start(pos))
            .and_then(|_| file.read_exact(&mut byte))
            .map_err(|e| Error::io(path, e))?;
        if byte[0] == b'\n' {
            start = pos + 1;
            break;
        }
    }

    file.seek(SeekFrom::Start(start))
        .map_err(|e| Error::io(path, e))?;
    let mut tail = Vec::with_capacity((len - start) as usize);
    file.read_to_end(&mut tail).map_err(|e| Error::io(path, e))?;

    let line = String::from_utf8_lossy(&tail);
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
