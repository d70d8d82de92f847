//! Single-file database handles
//!
//! An [`NdbFile`] is one opened ndb file. Its loaded state lives in an
//! immutable [`Snapshot`] (raw contents, modification time and parsed
//! records) shared through an `Arc`. [`NdbFile::reopen`] builds a complete new
//! snapshot and swaps it in only if loading succeeded, so a failed reload
//! leaves the previous records fully usable.
//!
//! # Examples
//!
//! ```no_run
//! use ndb::NdbFile;
//!
//! let mut file = NdbFile::load("/lib/ndb/local")?;
//! println!("{} records", file.records().len());
//!
//! if file.changed()? {
//!     file.reopen()?;
//! }
//! # Ok::<(), ndb::NdbError>(())
//! ```

use crate::error::{NdbError, Result};
use crate::file_reader;
use crate::parser::parse_records;
use crate::record::RecordSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Loaded state of one file
#[derive(Debug)]
pub struct Snapshot {
    contents: Vec<u8>,
    mtime: SystemTime,
    records: RecordSet,
}

impl Snapshot {
    /// Raw (decompressed) file contents
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Modification time at load
    pub fn mtime(&self) -> SystemTime {
        self.mtime
    }

    /// Parsed records
    pub fn records(&self) -> &RecordSet {
        &self.records
    }
}

/// One opened ndb file
#[derive(Debug, Clone)]
pub struct NdbFile {
    path: PathBuf,
    snapshot: Arc<Snapshot>,
}

impl NdbFile {
    /// Open, read and parse one file
    ///
    /// Fails with [`NdbError::NotFound`] if the file is missing,
    /// [`NdbError::Io`] on other read failures and [`NdbError::Parse`] if the
    /// contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let snapshot = read_snapshot(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            snapshot: Arc::new(snapshot),
        })
    }

    /// Path used to open (and reopen) this file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records parsed at the last successful load
    pub fn records(&self) -> &RecordSet {
        &self.snapshot.records
    }

    /// Modification time recorded at the last successful load
    pub fn mtime(&self) -> SystemTime {
        self.snapshot.mtime
    }

    /// Raw contents read at the last successful load
    pub fn contents(&self) -> &[u8] {
        &self.snapshot.contents
    }

    /// Shared handle to the current snapshot
    ///
    /// The snapshot stays valid after a later [`reopen`](Self::reopen).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Reload the file from disk
    ///
    /// On failure the previously loaded state is left untouched.
    pub fn reopen(&mut self) -> Result<()> {
        let fresh = self.load_snapshot()?;
        self.replace(fresh);
        Ok(())
    }

    /// Whether the on-disk modification time differs from the loaded one
    ///
    /// Stats the file without reading it. A stat failure (including a
    /// deleted file) is reported as [`NdbError::Io`].
    pub fn changed(&self) -> Result<bool> {
        let mtime =
            file_reader::modified(&self.path).map_err(|e| NdbError::io(&self.path, e))?;
        Ok(mtime != self.snapshot.mtime)
    }

    pub(crate) fn load_snapshot(&self) -> Result<Arc<Snapshot>> {
        read_snapshot(&self.path).map(Arc::new)
    }

    pub(crate) fn replace(&mut self, snapshot: Arc<Snapshot>) {
        self.snapshot = snapshot;
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let file = File::open(path).map_err(|e| NdbError::open(path, e))?;
    let (contents, mtime) = file_reader::read_file(file, file_reader::is_gzip(path))
        .map_err(|e| NdbError::io(path, e))?;
    let records = parse_records(&contents).map_err(|e| e.with_path(path))?;

    debug!(
        path = %path.display(),
        bytes = contents.len(),
        records = records.len(),
        "loaded ndb file"
    );

    Ok(Snapshot {
        contents,
        mtime,
        records,
    })
}
