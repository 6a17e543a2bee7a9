//! Basket construction from CSV records
//!
//! Streams a CSV file row by row without materializing the table: each
//! selected column's cell becomes a `"<column> / <value>"` item, and each
//! row becomes one basket. The column selection and the values to skip are
//! explicit configuration, not constants baked into the module.

use crate::basket::{Basket, Item};
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Decides which cell values are kept when building baskets
#[derive(Debug, Clone)]
pub struct ValueFilter {
    skip_values: Vec<String>,
    skip_pattern: Option<Regex>,
}

impl ValueFilter {
    /// Build a filter from exact values to skip and an optional regex.
    ///
    /// Empty cells are always skipped.
    pub fn new(skip_values: &[String], skip_pattern: Option<&str>) -> Result<Self> {
        let skip_pattern = match skip_pattern {
            Some(pattern) => Some(
                Regex::new(pattern)
                    .with_context(|| format!("invalid --skip-pattern regex: {}", pattern))?,
            ),
            None => None,
        };
        Ok(Self {
            skip_values: skip_values.to_vec(),
            skip_pattern,
        })
    }

    /// Filter that keeps every non-empty value
    pub fn keep_all() -> Self {
        Self {
            skip_values: Vec::new(),
            skip_pattern: None,
        }
    }

    /// True when `value` should contribute an item
    pub fn keeps(&self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        if self.skip_values.iter().any(|skip| skip == value) {
            return false;
        }
        if let Some(ref pattern) = self.skip_pattern {
            if pattern.is_match(value) {
                return false;
            }
        }
        true
    }
}

/// Canonical item label for a column/value pair
pub fn item_label(column: &str, value: &str) -> Item {
    format!("{} / {}", column, value)
}

/// Read `path` as CSV and build one basket per record.
///
/// `columns` selects which header columns are tokenized; `None` uses every
/// column. Rows shorter than the header simply contribute fewer items.
///
/// # Errors
///
/// Fails on unreadable input, a missing header row, or a requested column
/// that the header does not contain.
pub fn read_baskets(
    path: &Path,
    columns: Option<&[String]>,
    filter: &ValueFilter,
) -> Result<Vec<Basket>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut lines = RecordReader::new(BufReader::new(file));

    let header = match lines.next_record()? {
        Some(record) => record,
        None => bail!("{}: empty file, expected a CSV header row", path.display()),
    };
    let selected = resolve_columns(&header, columns)?;
    debug!(columns = selected.len(), "resolved basket columns");

    let mut baskets = Vec::new();
    while let Some(record) = lines.next_record()? {
        let mut basket = Basket::new();
        for &idx in &selected {
            let Some(value) = record.get(idx) else {
                continue;
            };
            let value = value.trim();
            if filter.keeps(value) {
                basket.insert(item_label(&header[idx], value));
            }
        }
        baskets.push(basket);
    }
    debug!(baskets = baskets.len(), "ingest complete");
    Ok(baskets)
}

/// Map requested column names to header indices; `None` selects all
fn resolve_columns(header: &[String], columns: Option<&[String]>) -> Result<Vec<usize>> {
    match columns {
        None => Ok((0..header.len()).collect()),
        Some(requested) => requested
            .iter()
            .map(|name| {
                header
                    .iter()
                    .position(|h| h == name)
                    .with_context(|| format!("column not found in header: {}", name))
            })
            .collect(),
    }
}

/// Streaming CSV record reader with quoted-field support.
///
/// A record normally spans one line, but a quoted field may embed newlines;
/// lines are accumulated until the quotes balance.
struct RecordReader<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> RecordReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }

    fn next_record(&mut self) -> Result<Option<Vec<String>>> {
        loop {
            self.buf.clear();
            loop {
                let read = self
                    .reader
                    .read_line(&mut self.buf)
                    .context("failed to read CSV record")?;
                if read == 0 {
                    if self.buf.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                // An odd number of quotes means a field is still open
                if self.buf.matches('"').count() % 2 == 0 {
                    break;
                }
            }
            let line = self.buf.trim_end_matches(&['\n', '\r'][..]);
            if !line.is_empty() {
                return Ok(Some(parse_record(line)));
            }
            // Blank separator lines carry no record; keep scanning
        }
    }
}

/// Split one CSV record into fields, honoring quotes and `""` escapes
fn parse_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
