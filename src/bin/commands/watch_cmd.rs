use anyhow::{Context, Result};
use ndb::{Ndb, NdbFile};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::cli_utils::{open_db, print_matches};

pub fn cmd_watch(
    file: Option<PathBuf>,
    attr: String,
    val: String,
    rattr: Option<String>,
    json: bool,
) -> Result<()> {
    let mut db = open_db(file)?;
    print_matches(&db.search(&attr, &val), rattr.as_deref(), json)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::Relaxed);
    })
    .context("Failed to set Ctrl+C handler")?;

    // Watch parent directories: editors often replace files instead of
    // writing them in place, which drops a watch on the file itself
    let (tx, rx) = mpsc::channel();
    let mut watcher: RecommendedWatcher =
        Watcher::new(tx, Config::default()).context("Failed to create file watcher")?;
    for dir in watch_dirs(db.files().iter().map(NdbFile::path)) {
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
    }
    info!(files = db.len(), "watching for changes (Ctrl+C to stop)");

    while !shutdown.load(Ordering::Relaxed) {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(Ok(event)) => {
                if is_content_event(&event) && reload_if_changed(&mut db) {
                    print_matches(&db.search(&attr, &val), rattr.as_deref(), json)?;
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "file watcher error");
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("watch stopped");
    Ok(())
}

/// Distinct parent directories of `paths`; a bare file name maps to `.`
fn watch_dirs<'a>(paths: impl IntoIterator<Item = &'a Path>) -> BTreeSet<PathBuf> {
    paths
        .into_iter()
        .map(|path| match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        })
        .collect()
}

fn is_content_event(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Reload the chain if any file changed; returns whether new records are loaded
fn reload_if_changed(db: &mut Ndb) -> bool {
    match db.changed() {
        Ok(false) => false,
        Ok(true) => match db.reopen() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous records");
                false
            }
        },
        // A file mid-replacement may briefly be missing
        Err(e) => {
            warn!(error = %e, "change check failed");
            false
        }
    }
}
