//! Line-oriented record loader.
//!
//! Each non-blank line holds one record: an integer key, optionally
//! followed by auxiliary text, e.g. `<33, A>`, `33,A` or `33`. Angle
//! brackets around the line are optional; commas and whitespace both
//! separate fields.


use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;
use crate::rbtree::RBTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: i64,
    pub aux: Option<String>,
}

/// Parse one line. `Ok(None)` for a blank line, `lineno` is only used
/// for error reporting.
pub fn parse_line(lineno: usize, line: &str) -> Result<Option<Record>, Error> {
    let mut body = line.trim();
    if body.starts_with('<') {
        body = &body[1..];
    }
    if body.ends_with('>') {
        body = &body[..body.len() - 1];
    }
    let mut fields = body.split(|c: char| c == ',' || c.is_whitespace()).filter(|f| !f.is_empty());
    let key = match fields.next() {
        Some(key) => key,
        None => return Ok(None),
    };
    let key = match key.parse::<i64>() {
        Ok(key) => key,
        Err(_) => return Err(Error::Parse { line: lineno, text: line.to_string() }),
    };
    let aux = fields.next().map(|s| s.to_string());
    Ok(Some(Record { key, aux }))
}

/// Read every record, stopping at the first malformed line.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, Error> {
    let mut records = vec![];
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_line(n + 1, &line)? {
            records.push(record);
        }
    }
    debug!("loaded {} records", records.len());
    Ok(records)
}

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, Error> {
    let file = File::open(path.as_ref())?;
    debug!("reading records from {}", path.as_ref().display());
    read_records(BufReader::new(file))
}

/// Bulk-load the keys of every record into a fresh tree.
pub fn load_tree<R: BufRead>(reader: R) -> Result<RBTree<i64>, Error> {
    let records = read_records(reader)?;
    Ok(records.into_iter().map(|r| r.key).collect())
}
