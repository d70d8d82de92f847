//! Line tokenizer for ndb text
//!
//! Splits a single line into whitespace-separated tokens. Double quotes
//! protect whitespace: each `"` toggles the quoted state, so
//! `dogs="very large"` is one token. Quote characters stay in the token text;
//! the tuple parser trims them from the value.
//!
//! A `#` outside quotes starts a comment that runs to the end of the line,
//! wherever it appears.

/// Comment delimiter
pub const COMMENT: char = '#';

/// Quote character
pub const QUOTE: char = '"';

/// Iterator over the raw tokens of a line
///
/// Tokens borrow from the line. An unterminated quote yields the remainder
/// of the line as the final token.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    /// Tokenize `line`
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let line = self.rest.trim_start();
        if line.is_empty() || line.starts_with(COMMENT) {
            self.rest = "";
            return None;
        }

        let mut in_quote = false;
        for (i, c) in line.char_indices() {
            if c == QUOTE {
                in_quote = !in_quote;
                continue;
            }
            if in_quote {
                continue;
            }
            if c.is_whitespace() {
                self.rest = &line[i + c.len_utf8()..];
                return Some(&line[..i]);
            }
            if c == COMMENT {
                // Comment ends both the token and the line
                self.rest = "";
                return Some(&line[..i]);
            }
        }

        self.rest = "";
        Some(line)
    }
}

/// Tokenize a line into raw tokens
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens::new(line)
}
