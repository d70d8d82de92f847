//! Error types for the ndb library

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for ndb operations
pub type Result<T> = std::result::Result<T, NdbError>;

/// Main error type for ndb operations
#[derive(Error, Debug)]
pub enum NdbError {
    /// The database file does not exist
    #[error("{}: file not found", .path.display())]
    NotFound {
        /// Path that was opened
        path: PathBuf,
    },

    /// Read or stat failure other than a missing file
    #[error("{}: {source}", .path.display())]
    Io {
        /// Path being read or stat'ed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A line could not be parsed into tuples
    #[error("{}line {line_no}: {source}: {line:?}", path_prefix(.path))]
    Parse {
        /// File the line came from, if known
        path: Option<PathBuf>,
        /// 1-based line number
        line_no: usize,
        /// The offending line text
        line: String,
        /// The tuple failure
        #[source]
        source: Box<NdbError>,
    },

    /// A token lacked `=` or had an empty attribute
    #[error("invalid tuple {token:?}")]
    InvalidTuple {
        /// The raw token text
        token: String,
    },

    /// A file named by the head's `database` record failed to load
    #[error("chained file {}: {source}", .path.display())]
    ChainLoad {
        /// The `file=` value that failed
        path: PathBuf,
        /// Why it failed
        #[source]
        source: Box<NdbError>,
    },
}

fn path_prefix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!("{}: ", p.display()),
        None => String::new(),
    }
}

impl NdbError {
    /// Classify an error from opening `path`, separating a missing file from other failures
    pub(crate) fn open(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            NdbError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            NdbError::io(path, err)
        }
    }

    pub(crate) fn io(path: &Path, err: io::Error) -> Self {
        NdbError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }

    /// Attach a file path to a parse error raised before the path was known
    pub(crate) fn with_path(self, file: &Path) -> Self {
        match self {
            NdbError::Parse {
                path: None,
                line_no,
                line,
                source,
            } => NdbError::Parse {
                path: Some(file.to_path_buf()),
                line_no,
                line,
                source,
            },
            other => other,
        }
    }

    /// Whether this error (or the chained error it wraps) is a missing file
    pub fn is_not_found(&self) -> bool {
        match self {
            NdbError::NotFound { .. } => true,
            NdbError::ChainLoad { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_classifies_not_found() {
        let err = NdbError::open(
            Path::new("/nope"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, NdbError::NotFound { .. }));
        assert!(err.is_not_found());

        let err = NdbError::open(
            Path::new("/nope"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, NdbError::Io { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_parse_display_includes_path_and_line() {
        let err = NdbError::Parse {
            path: None,
            line_no: 3,
            line: "bogus".to_string(),
            source: Box::new(NdbError::InvalidTuple {
                token: "bogus".to_string(),
            }),
        };
        assert_eq!(err.to_string(), r#"line 3: invalid tuple "bogus": "bogus""#);

        let err = err.with_path(Path::new("db/local"));
        assert_eq!(
            err.to_string(),
            r#"db/local: line 3: invalid tuple "bogus": "bogus""#
        );
    }

    #[test]
    fn test_chain_load_not_found() {
        let err = NdbError::ChainLoad {
            path: PathBuf::from("db/common"),
            source: Box::new(NdbError::NotFound {
                path: PathBuf::from("db/common"),
            }),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "chained file db/common: db/common: file not found"
        );
    }
}
