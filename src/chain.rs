//! Multi-file databases
//!
//! An [`Ndb`] is an ordered chain of [`NdbFile`]s searched as one logical
//! database. The first file is the one named at open time. If it contains a
//! record with a `database` attribute, every `file=` tuple of that record
//! names another file to load and append, in listed order:
//!
//! ```text
//! database=
//!     file=/lib/ndb/local
//!     file=/lib/ndb/common
//! ```
//!
//! A `file=` entry naming the head file itself is skipped. Only the head's
//! `database` record is consulted; chained files are not followed further.

use crate::database::NdbFile;
use crate::error::{NdbError, Result};
use crate::record::RecordSet;
use crate::search::search;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Database opened when no path is given
pub const DEFAULT_PATH: &str = "/lib/ndb/local";

/// Attribute marking the record that lists chained files
pub const DATABASE_ATTR: &str = "database";

/// Attribute naming one chained file
pub const FILE_ATTR: &str = "file";

/// Options for opening an [`Ndb`]
///
/// # Examples
///
/// ```no_run
/// use ndb::OpenOptions;
///
/// // An empty path falls back to the configured default
/// let db = OpenOptions::new()
///     .default_path("tests/testndb/local")
///     .open("")?;
/// # Ok::<(), ndb::NdbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OpenOptions {
    default_path: PathBuf,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_PATH),
        }
    }
}

impl OpenOptions {
    /// Options with the standard default path
    pub fn new() -> Self {
        Self::default()
    }

    /// Path to open when [`open`](Self::open) is given an empty path
    pub fn default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Open `path` and every file its `database` record chains in
    ///
    /// Nothing is returned unless every file loads: a failure in the head is
    /// returned as is, a failure in a chained file as
    /// [`NdbError::ChainLoad`].
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Ndb> {
        let path = path.as_ref();
        let path = if path.as_os_str().is_empty() {
            self.default_path.as_path()
        } else {
            path
        };

        let head = NdbFile::load(path)?;
        let mut files = Vec::new();

        if let Some(dbrec) = head.records().find(DATABASE_ATTR, "") {
            for file in dbrec.values_of(FILE_ATTR) {
                let file = Path::new(file);
                if file == path {
                    debug!(path = %file.display(), "skipping self reference");
                    continue;
                }
                let next = NdbFile::load(file).map_err(|e| NdbError::ChainLoad {
                    path: file.to_path_buf(),
                    source: Box::new(e),
                })?;
                debug!(head = %path.display(), path = %file.display(), "chained ndb file");
                files.push(next);
            }
        }

        files.insert(0, head);
        Ok(Ndb { files })
    }
}

/// A database made of one or more chained files
///
/// # Examples
///
/// ```no_run
/// use ndb::Ndb;
///
/// let db = Ndb::open("/lib/ndb/local")?;
/// let found = db.search("sys", "helix");
/// println!("ip={}", found.value_of("ip"));
/// # Ok::<(), ndb::NdbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Ndb {
    files: Vec<NdbFile>,
}

impl Ndb {
    /// Open `path` with default options
    ///
    /// An empty `path` opens [`DEFAULT_PATH`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        OpenOptions::new().open(path)
    }

    /// Files in search order, head first
    pub fn files(&self) -> &[NdbFile] {
        &self.files
    }

    /// The file named at open time
    pub fn head(&self) -> &NdbFile {
        &self.files[0]
    }

    /// Number of files in the chain, at least one for the head
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Records of every file containing a tuple matching `attr`/`val`
    ///
    /// An empty `val` matches any value. Files are searched in chain order,
    /// records in file order. Finding nothing yields an empty set.
    pub fn search(&self, attr: &str, val: &str) -> RecordSet {
        search(self.files.iter().map(NdbFile::records), attr, val)
    }

    /// Reload every file in the chain
    ///
    /// All files are read before any is replaced: on error the whole chain
    /// keeps its previous state and the first failure is returned.
    pub fn reopen(&mut self) -> Result<()> {
        let fresh = self
            .files
            .iter()
            .map(NdbFile::load_snapshot)
            .collect::<Result<Vec<_>>>()?;

        for (file, snapshot) in self.files.iter_mut().zip(fresh) {
            file.replace(snapshot);
        }
        info!(head = %self.head().path().display(), files = self.files.len(), "reopened ndb");
        Ok(())
    }

    /// Whether any file in the chain changed on disk since it was loaded
    ///
    /// Stops at the first changed file or the first stat error.
    pub fn changed(&self) -> Result<bool> {
        for file in &self.files {
            if file.changed()? {
                debug!(path = %file.path().display(), "ndb file changed");
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn write(&self, name: &str, text: &str) -> PathBuf {
            let path = self.path(name);
            fs::write(&path, text).unwrap();
            path
        }
    }

    #[test]
    fn test_single_file_without_database_record() {
        let fx = Fixture::new();
        let local = fx.write("local", "sys=helix ip=10.0.0.2\n");

        let db = Ndb::open(&local).unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.head().path(), local.as_path());
        assert!(db.search(DATABASE_ATTR, "").is_empty());
    }

    #[test]
    fn test_chain_of_three() {
        let fx = Fixture::new();
        let hosts = fx.write("hosts", "sys=helix ip=10.0.0.2\n");
        let services = fx.write("services", "udp=syslog port=514\n");
        let local = fx.write(
            "local",
            &format!(
                "database=\n\tfile={}\n\tfile={}\n",
                hosts.display(),
                services.display()
            ),
        );

        let db = Ndb::open(&local).unwrap();
        let paths: Vec<_> = db.files().iter().map(NdbFile::path).collect();
        assert_eq!(
            paths,
            vec![local.as_path(), hosts.as_path(), services.as_path()]
        );

        // The database record lives only in the head
        assert_eq!(db.search(DATABASE_ATTR, "").len(), 1);
        assert_eq!(db.search("udp", "syslog").value_of("port"), "514");
    }

    #[test]
    fn test_self_reference_is_skipped() {
        let fx = Fixture::new();
        let common = fx.write("common", "tcp=echo port=7\n");
        let local_path = fx.path("local");
        let local = fx.write(
            "local",
            &format!(
                "database=\n\tfile={}\n\tfile={}\nsys=helix\n",
                local_path.display(),
                common.display()
            ),
        );

        let db = Ndb::open(&local).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.files()[1].path(), common.as_path());
        assert_eq!(db.search("sys", "helix").len(), 1);
    }

    #[test]
    fn test_missing_chained_file_aborts_open() {
        let fx = Fixture::new();
        let missing = fx.path("missing");
        let local = fx.write("local", &format!("database= file={}\n", missing.display()));

        match Ndb::open(&local).unwrap_err() {
            NdbError::ChainLoad { path, source } => {
                assert_eq!(path, missing);
                assert!(matches!(*source, NdbError::NotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_path_uses_default() {
        let fx = Fixture::new();
        let local = fx.write("local", "sys=helix\n");

        let db = OpenOptions::new().default_path(&local).open("").unwrap();
        assert_eq!(db.head().path(), local.as_path());

        let err = OpenOptions::new()
            .default_path(fx.path("nowhere"))
            .open("")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_only_first_database_record_is_used() {
        let fx = Fixture::new();
        let a = fx.write("a", "sys=a\n");
        let b = fx.write("b", "sys=b\n");
        let local = fx.write(
            "local",
            &format!(
                "database= file={}\ndatabase= file={}\n",
                a.display(),
                b.display()
            ),
        );

        let db = Ndb::open(&local).unwrap();
        assert_eq!(db.len(), 2);
        assert!(db.search("sys", "b").is_empty());
    }

    #[test]
    fn test_reopen_is_all_or_nothing() {
        let fx = Fixture::new();
        let common = fx.write("common", "tcp=echo port=7\n");
        let local = fx.write(
            "local",
            &format!("database= file={}\nsys=helix\n", common.display()),
        );

        let mut db = Ndb::open(&local).unwrap();

        fs::write(
            &local,
            format!("database= file={}\nsys=helix\nsys=new\n", common.display()),
        )
        .unwrap();
        fs::remove_file(&common).unwrap();

        assert!(db.reopen().is_err());
        // Head was readable but must not have been swapped in
        assert!(db.search("sys", "new").is_empty());
        assert_eq!(db.search("tcp", "echo").value_of("port"), "7");

        fs::write(&common, "tcp=echo port=77\n").unwrap();
        db.reopen().unwrap();
        assert_eq!(db.search("sys", "new").len(), 1);
        assert_eq!(db.search("tcp", "echo").value_of("port"), "77");
    }

    #[test]
    fn test_changed_walks_chain() {
        let fx = Fixture::new();
        let common = fx.write("common", "tcp=echo port=7\n");
        let local = fx.write("local", &format!("database= file={}\n", common.display()));

        let db = Ndb::open(&local).unwrap();
        assert!(!db.changed().unwrap());

        let file = fs::OpenOptions::new().write(true).open(&common).unwrap();
        let later = db.files()[1].mtime() + std::time::Duration::from_secs(60);
        file.set_modified(later).unwrap();
        assert!(db.changed().unwrap());

        fs::remove_file(&common).unwrap();
        assert!(db.changed().is_err());
    }
}
