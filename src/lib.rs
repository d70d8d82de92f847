//! ndb - Network Database Parser and Lookup Engine
//!
//! Reads the attribute/value "network database" format used to describe
//! hosts, networks, services and protocols, and searches it.
//!
//! # Quick Start
//!
//! ```rust
//! use ndb::Ndb;
//! # let dir = tempfile::tempdir()?;
//! # let local = dir.path().join("local");
//! # std::fs::write(&local, "udp=syslog port=514\n\tproto=udp\n")?;
//!
//! let db = Ndb::open(&local)?;
//! let found = db.search("udp", "syslog");
//! assert_eq!(found.value_of("port"), "514");
//!
//! // Presence match: any value of `udp`
//! assert_eq!(db.search("udp", "").len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # File Format
//!
//! ```text
//! # comment, anywhere outside quotes
//! sys=helix ip=10.0.0.2 dom=helix.example
//!     ether=0800690222f0             <- continuation of the helix record
//!     motd="back at 5"               <- quoted values may hold spaces
//!
//! database=                          <- chain other files into this one
//!     file=/lib/ndb/local
//!     file=/lib/ndb/common
//! ```
//!
//! A line starting with non-whitespace starts a record; a line starting
//! with whitespace continues it. Each token is `attr=value`, `attr=` or
//! `attr="quoted value"`.
//!
//! # Architecture
//!
//! ```text
//! bytes ─► tokenizer ─► tuple ─► parser ─► RecordSet (one per file)
//!                                              │
//!                        chain (Ndb: Vec<NdbFile>) ─► search
//! ```
//!
//! Each [`NdbFile`] holds an immutable snapshot of its file. [`Ndb::reopen`]
//! reloads every file and swaps the snapshots in only if all loads succeed.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Multi-file databases and open options
pub mod chain;
/// Single-file handles and snapshots
pub mod database;
/// Error types for ndb operations
pub mod error;
/// Whole-file reading with gzip support
pub mod file_reader;
/// Record assembly from lines
pub mod parser;
/// Records and record sets
pub mod record;
/// Linear search across record sets
pub mod search;
/// Line tokenizer
pub mod tokenizer;
/// Attribute/value tuples
pub mod tuple;

// Re-exports for Rust consumers

/// Chained database, its options and the default path
pub use crate::chain::{Ndb, OpenOptions, DEFAULT_PATH};
pub use crate::database::{NdbFile, Snapshot};
pub use crate::error::{NdbError, Result};
pub use crate::record::{Record, RecordSet};
pub use crate::tuple::Tuple;

/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
