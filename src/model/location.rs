//! Source locations reported by rc
//!
//! rc prints locations as `path:line:col:` tokens. The JSON reference listings
//! (`-r ... --json`) wrap each one in a `{"loc": ..., "ctx": ...}` record where
//! `ctx` is the text of the referencing line.

use crate::error::MalformedOutput;
use serde::{Deserialize, Serialize};

/// A single navigable position in a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub filename: String,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    /// Context shown next to the location (usually the source line)
    pub text: String,
}

/// One entry of a JSON reference listing as emitted by rc
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationRecord {
    pub loc: String,
    #[serde(default)]
    pub ctx: String,
}

impl LocationRecord {
    pub fn new(loc: impl Into<String>, ctx: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ctx: ctx.into(),
        }
    }
}

impl Location {
    /// Parse a strict `path:line:col:extra` token. Anything other than exactly four
    /// colon-separated parts is rejected.
    pub fn parse_token(token: &str, text: impl Into<String>) -> Result<Self, MalformedOutput> {
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() != 4 {
            return Err(MalformedOutput::MalformedRecord {
                record: token.to_string(),
                separator: ':',
                expected: 4,
                found: parts.len(),
            });
        }

        Ok(Self {
            filename: parts[0].to_string(),
            line: parse_number(token, parts[1])?,
            column: parse_number(token, parts[2])?,
            text: text.into(),
        })
    }

    /// Parse a jump target such as the output of `rc -f` (`path:line:col:\tcontext`).
    ///
    /// Only the first three parts are used and anything after them is ignored, so
    /// `path:line:col` without a trailing colon is accepted as well.
    pub fn parse_position(text: &str) -> Result<Self, MalformedOutput> {
        let trimmed = text.trim();
        let mut parts = trimmed.splitn(4, ':');
        let (Some(filename), Some(line), Some(column)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(MalformedOutput::MalformedRecord {
                record: trimmed.to_string(),
                separator: ':',
                expected: 3,
                found: trimmed.split(':').count(),
            });
        };

        Ok(Self {
            filename: filename.to_string(),
            line: parse_number(trimmed, line)?,
            column: parse_number(trimmed, column.trim())?,
            text: String::new(),
        })
    }
}

fn parse_number(record: &str, text: &str) -> Result<usize, MalformedOutput> {
    text.parse().map_err(|_| MalformedOutput::InvalidNumber {
        record: record.to_string(),
        text: text.to_string(),
    })
}

/// Convert rc reference records into locations, preserving their order.
///
/// Fails on the first malformed record; partial results are never returned.
pub fn parse_locations(records: &[LocationRecord]) -> Result<Vec<Location>, MalformedOutput> {
    records
        .iter()
        .map(|record| Location::parse_token(&record.loc, record.ctx.as_str()))
        .collect()
}

/// Parse the stdout of a `--json` reference query.
pub fn parse_location_listing(stdout: &str) -> Result<Vec<Location>, MalformedOutput> {
    let records: Vec<LocationRecord> = serde_json::from_str(stdout)?;
    parse_locations(&records)
}
