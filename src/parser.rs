//! Record assembly
//!
//! Groups the lines of an ndb file into records. A line whose first
//! character is not whitespace starts a new record; a line starting with
//! whitespace continues the record in progress. Lines with no tuples (blank,
//! whitespace-only or comment-only) are skipped and never end a record.
//!
//! ```text
//! ipnet=lan ip=10.0.0.0 ipmask=255.255.255.0   <- record 1
//!     dns=10.0.0.1                              <- record 1 (continued)
//! # comment                                     <- ignored
//! sys=helix ip=10.0.0.2                         <- record 2
//! ```
//!
//! Every record returned has at least one tuple, so a file with N
//! record-starting lines yields exactly N records.

use crate::error::{NdbError, Result};
use crate::record::{Record, RecordSet};
use crate::tuple::parse_tuples;
use std::borrow::Cow;

/// Iterate over the lines of `data`, splitting on `\n` and dropping a trailing `\r`
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn lines(data: &[u8]) -> impl Iterator<Item = Cow<'_, str>> {
    let mut start = 0;
    let mut ends = memchr::memchr_iter(b'\n', data);
    std::iter::from_fn(move || {
        let end = match ends.next() {
            Some(end) => end,
            None if start < data.len() => data.len(),
            None => return None,
        };
        let mut line = &data[start..end];
        start = end + 1;
        if let [rest @ .., b'\r'] = line {
            line = rest;
        }
        Some(String::from_utf8_lossy(line))
    })
}

/// Parse ndb text into records
///
/// Fails with [`NdbError::Parse`] on the first malformed token; the error
/// carries the 1-based line number and the line text but no file path.
pub fn parse_records(data: &[u8]) -> Result<RecordSet> {
    let mut records = RecordSet::new();
    let mut current = Record::new();

    for (idx, line) in lines(data).enumerate() {
        let tuples = parse_tuples(&line).map_err(|e| NdbError::Parse {
            path: None,
            line_no: idx + 1,
            line: line.to_string(),
            source: Box::new(e),
        })?;
        if tuples.is_empty() {
            continue;
        }

        let continuation = line.starts_with(char::is_whitespace);
        if !continuation && !current.is_empty() {
            records.push(std::mem::take(&mut current));
        }
        current.extend(tuples);
    }

    if !current.is_empty() {
        records.push(current);
    }

    Ok(records)
}
