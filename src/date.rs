//! Date patterns for the date column.
//!
//! A pattern is either a `chrono` strftime string (anything containing `%`)
//! or a token pattern such as `DD/MM/YYYY`, which is compiled to the
//! equivalent strftime string once, when the mapping is validated.

use crate::error::RecordError;

use chrono::NaiveDate;

/// Tokens recognised in a token pattern, longest first so that `MMMM` is not
/// read as two `MM`.
const TOKENS: [(&str, &str); 8] = [
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("M", "%m"),
    ("D", "%d"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
}

impl DateFormat {
    /// Compiles `pattern`. This cannot fail: characters that are not tokens
    /// are literals, and a bad strftime pattern only shows up when a date is
    /// parsed with it.
    pub fn new(pattern: &str) -> Self {
        let strftime = if pattern.contains('%') {
            pattern.to_string()
        } else {
            compile_tokens(pattern)
        };

        Self {
            pattern: pattern.to_string(),
            strftime,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parses `value`, which must match the whole pattern.
    ///
    /// chrono skips whitespace before numeric fields, so whitespace the
    /// pattern does not ask for is rejected up front.
    pub fn parse(&self, value: &str) -> Result<NaiveDate, RecordError> {
        let unexpected_space = value.starts_with(char::is_whitespace)
            || (value.contains(char::is_whitespace)
                && !self.strftime.contains(char::is_whitespace));
        if unexpected_space {
            return Err(RecordError::DateParse {
                value: value.to_string(),
                reason: "unexpected whitespace".to_string(),
            });
        }

        NaiveDate::parse_from_str(value, &self.strftime).map_err(|e| RecordError::DateParse {
            value: value.to_string(),
            reason: e.to_string(),
        })
    }
}

fn compile_tokens(pattern: &str) -> String {
    let mut strftime = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        for (token, item) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                strftime.push_str(item);
                rest = after;
                continue 'outer;
            }
        }

        strftime.push(c);
        rest = &rest[c.len_utf8()..];
    }

    strftime
}

/// ISO 8601 calendar date, e.g. `2020-01-07`.
pub fn render_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
