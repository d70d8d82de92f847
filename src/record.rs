//! Records and record sets
//!
//! A [`Record`] is the ordered group of tuples describing one entity, and
//! may span several continuation lines in the source file. A [`RecordSet`]
//! is an ordered list of records, either everything parsed from one file or
//! the result of a search.

use crate::tuple::Tuple;
use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// An ordered group of tuples
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    tuples: Vec<Tuple>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Tuples in source order
    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    /// Iterate over the tuples in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Tuple> {
        self.tuples.iter()
    }

    /// Number of tuples
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// Whether the record has no tuples
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// The first tuple, which by convention names the entity
    pub fn first(&self) -> Option<&Tuple> {
        self.tuples.first()
    }

    /// Value of the first tuple with `attr`, or `""` if absent
    pub fn value_of(&self, attr: &str) -> &str {
        self.iter()
            .find(|t| t.attr() == attr)
            .map(|t| t.val())
            .unwrap_or("")
    }

    /// All values of `attr`, in order
    pub fn values_of<'a>(&'a self, attr: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter()
            .filter(move |t| t.attr() == attr)
            .map(|t| t.val())
    }

    /// Whether any tuple has attribute `attr`
    pub fn has(&self, attr: &str) -> bool {
        self.iter().any(|t| t.attr() == attr)
    }

    /// Whether any tuple matches `attr` and, unless `val` is empty, `val`
    pub fn matches(&self, attr: &str, val: &str) -> bool {
        self.iter()
            .any(|t| t.attr() == attr && (val.is_empty() || t.val() == val))
    }

    pub(crate) fn extend(&mut self, tuples: impl IntoIterator<Item = Tuple>) {
        self.tuples.extend(tuples);
    }
}

impl From<Vec<Tuple>> for Record {
    fn from(tuples: Vec<Tuple>) -> Self {
        Self { tuples }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Tuple;
    type IntoIter = std::slice::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tuple) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", tuple)?;
        }
        Ok(())
    }
}

/// An ordered list of records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over the records in order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of tuples across all records
    pub fn tuple_count(&self) -> usize {
        self.iter().map(Record::len).sum()
    }

    /// Value of the first tuple with `attr` across all records, or `""`
    pub fn value_of(&self, attr: &str) -> &str {
        self.iter()
            .flat_map(Record::iter)
            .find(|t| t.attr() == attr)
            .map(|t| t.val())
            .unwrap_or("")
    }

    /// The first record containing a tuple matching `attr`/`val`
    ///
    /// An empty `val` matches on the presence of `attr` alone.
    pub fn find(&self, attr: &str, val: &str) -> Option<&Record> {
        self.iter().find(|r| r.matches(attr, val))
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl Index<usize> for RecordSet {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
