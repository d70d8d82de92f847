//! Whole-file reader with automatic gzip decompression
//!
//! Database files ending in `.gz` (case-insensitive) are decompressed
//! transparently. The modification time is taken from the file on disk, so
//! staleness checks work the same for compressed and plain files.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

/// Whether `path` names a gzip-compressed file, judging by its extension
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Read the full contents of an already-opened file
///
/// Returns the (decompressed) bytes together with the file's modification
/// time as of the open.
pub fn read_file(mut file: File, gzip: bool) -> io::Result<(Vec<u8>, SystemTime)> {
    let mtime = file.metadata()?.modified()?;

    let mut data = Vec::new();
    if gzip {
        GzDecoder::new(file).read_to_end(&mut data)?;
    } else {
        file.read_to_end(&mut data)?;
    }

    Ok((data, mtime))
}

/// Modification time of `path` without reading it
pub fn modified(path: &Path) -> io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}
