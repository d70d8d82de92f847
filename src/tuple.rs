//! Attribute/value tuples

use crate::error::{NdbError, Result};
use crate::tokenizer::{tokenize, COMMENT, QUOTE};
use serde::Serialize;
use std::fmt;

/// A single `attr=value` pair
///
/// The attribute is never empty. The value may be empty, in which case it is
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tuple {
    attr: String,
    val: String,
}

impl Tuple {
    /// Create a tuple from an attribute and value
    ///
    /// `attr` must not be empty; use [`Tuple::parse`] for untrusted text.
    pub fn new(attr: impl Into<String>, val: impl Into<String>) -> Self {
        let attr = attr.into();
        debug_assert!(!attr.is_empty(), "tuple attribute must not be empty");
        Self {
            attr,
            val: val.into(),
        }
    }

    /// Attribute name
    pub fn attr(&self) -> &str {
        &self.attr
    }

    /// Value, possibly empty
    pub fn val(&self) -> &str {
        &self.val
    }

    /// Parse a raw token of the form `attr=value`
    ///
    /// Splits on the first `=`; the value may contain further `=`. One
    /// leading and one trailing `"` are trimmed from the value.
    pub fn parse(token: &str) -> Result<Self> {
        let Some(eq) = memchr::memchr(b'=', token.as_bytes()) else {
            return Err(invalid(token));
        };
        let attr = &token[..eq];
        if attr.is_empty() {
            return Err(invalid(token));
        }

        let val = &token[eq + 1..];
        let val = val.strip_prefix(QUOTE).unwrap_or(val);
        let val = val.strip_suffix(QUOTE).unwrap_or(val);

        Ok(Self::new(attr, val))
    }
}

/// Formats as `attr=val`, wrapped in quotes when the bare form would not
/// parse back to the same value.
impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quotes(&self.val) {
            write!(f, "{}={}{}{}", self.attr, QUOTE, self.val, QUOTE)
        } else {
            write!(f, "{}={}", self.attr, self.val)
        }
    }
}

/// Whether `val` written bare would tokenize or trim differently
///
/// Quotes already inside the value toggle the tokenizer's quoted state, so a
/// space or `#` is only safe bare when an odd number of quotes precede it.
/// Wrapping flips that parity. When neither form is exact the quoted form is
/// used.
fn needs_quotes(val: &str) -> bool {
    if val.starts_with(QUOTE) || val.ends_with(QUOTE) {
        return true;
    }
    let mut in_quote = false;
    for c in val.chars() {
        if c == QUOTE {
            in_quote = !in_quote;
        } else if !in_quote && (c.is_whitespace() || c == COMMENT) {
            return true;
        }
    }
    false
}

fn invalid(token: &str) -> NdbError {
    NdbError::InvalidTuple {
        token: token.to_string(),
    }
}

/// Parse every tuple on one line, dropping any trailing comment
pub fn parse_tuples(line: &str) -> Result<Vec<Tuple>> {
    tokenize(line).map(Tuple::parse).collect()
}
