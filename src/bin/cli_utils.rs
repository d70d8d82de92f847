use anyhow::{Context, Result};
use ndb::{Ndb, RecordSet};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Open the database named on the command line, or the default one
pub fn open_db(file: Option<PathBuf>) -> Result<Ndb> {
    let path = file.unwrap_or_default();
    Ndb::open(&path).with_context(|| {
        if path.as_os_str().is_empty() {
            format!("Failed to open database: {}", ndb::DEFAULT_PATH)
        } else {
            format!("Failed to open database: {}", path.display())
        }
    })
}

/// Print search results
///
/// Without `rattr` each record is printed on one line as `attr=val ...`.
/// With `rattr` only the values of that attribute are printed, one per line.
pub fn print_matches(records: &RecordSet, rattr: Option<&str>, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match (rattr, json) {
        (None, false) => {
            for record in records {
                writeln!(out, "{}", record)?;
            }
        }
        (Some(rattr), false) => {
            for value in selected_values(records, rattr) {
                writeln!(out, "{}", value)?;
            }
        }
        (None, true) => {
            writeln!(out, "{}", serde_json::to_string_pretty(records)?)?;
        }
        (Some(rattr), true) => {
            let values: Vec<&str> = selected_values(records, rattr).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&json!(values))?)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn selected_values<'a>(records: &'a RecordSet, rattr: &'a str) -> impl Iterator<Item = &'a str> {
    records.iter().flat_map(move |r| r.values_of(rattr))
}

/// Seconds since the Unix epoch, or 0 for times before it
pub fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
