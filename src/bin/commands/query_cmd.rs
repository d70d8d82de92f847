use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::cli_utils::{open_db, print_matches};

pub fn cmd_query(
    file: Option<PathBuf>,
    attr: String,
    val: String,
    rattr: Option<String>,
    json: bool,
) -> Result<()> {
    let db = open_db(file)?;

    let records = db.search(&attr, &val);
    debug!(attr = %attr, val = %val, matches = records.len(), "query finished");

    // No match is not an error: print nothing and exit 0
    print_matches(&records, rattr.as_deref(), json)
}
