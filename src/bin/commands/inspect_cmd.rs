use anyhow::Result;
use ndb::file_reader::is_gzip;
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::{open_db, unix_secs};

pub fn cmd_inspect(file: Option<PathBuf>, json: bool) -> Result<()> {
    let db = open_db(file)?;

    if json {
        let files: Vec<_> = db
            .files()
            .iter()
            .map(|f| {
                json!({
                    "path": f.path().display().to_string(),
                    "mtime": unix_secs(f.mtime()),
                    "bytes": f.contents().len(),
                    "gzip": is_gzip(f.path()),
                    "records": f.records().len(),
                    "tuples": f.records().tuple_count(),
                })
            })
            .collect();
        let info = json!({
            "head": db.head().path().display().to_string(),
            "files": files,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Database: {}", db.head().path().display());
    println!("Files:    {}", db.len());
    println!();
    for (i, f) in db.files().iter().enumerate() {
        println!("[{}] {}", i, f.path().display());
        println!("    records: {}", f.records().len());
        println!("    tuples:  {}", f.records().tuple_count());
        let gzip = if is_gzip(f.path()) { " (gzip)" } else { "" };
        println!("    bytes:   {}{}", f.contents().len(), gzip);
        println!("    mtime:   {}", unix_secs(f.mtime()));
    }

    Ok(())
}
