//! Tokeniser for the comma-separated bikeway export.
//!
//! The export quotes fields that contain commas (every geometry does) but
//! never escapes quotes inside a field, so a quote simply toggles quoted mode
//! and is not part of the value.

use std::iter::{Enumerate, Skip};
use std::str::Lines;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// One decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: usize,
    fields: Vec<String>,
}

impl Row {
    /// Zero-based line index in the source text; the header is line 0.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Field at `column`, if the row has one.
    #[must_use]
    pub fn field(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// All fields in column order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Decodes delimited text into [`Row`]s.
///
/// # Examples
/// ```
/// use bikeway_data::TableDecoder;
///
/// let text = "ID,NAME,CLASS\n1,\"Bow, River\",Cycle Track\n2,short\n";
/// let mut rows = TableDecoder::new(3).decode(text);
/// let row = rows.next().unwrap();
/// assert_eq!(row.field(1), Some("Bow, River"));
/// assert!(rows.next().is_none());
/// assert_eq!(rows.short_rows(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDecoder {
    required_fields: usize,
}

impl TableDecoder {
    /// Decoder that skips rows with fewer than `required_fields` fields.
    #[must_use]
    pub const fn new(required_fields: usize) -> Self {
        Self { required_fields }
    }

    /// Lazily decode `text`, discarding the header line.
    #[must_use]
    pub fn decode(self, text: &str) -> Rows<'_> {
        Rows {
            lines: text.lines().enumerate().skip(1),
            required_fields: self.required_fields,
            short_rows: 0,
        }
    }
}

/// Lazy iterator over decoded rows.
///
/// Rows that are too short are skipped and counted rather than failing the
/// decode.
#[derive(Debug)]
pub struct Rows<'a> {
    lines: Skip<Enumerate<Lines<'a>>>,
    required_fields: usize,
    short_rows: usize,
}

impl Rows<'_> {
    /// Number of rows skipped so far for having too few fields.
    #[must_use]
    pub const fn short_rows(&self) -> usize {
        self.short_rows
    }
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        for (line, text) in self.lines.by_ref() {
            let fields = split_fields(text);
            if fields.len() >= self.required_fields {
                return Some(Row { line, fields });
            }
            self.short_rows += 1;
        }
        None
    }
}

/// Split one line into fields, honouring quoted sections.
///
/// # Examples
/// ```
/// use bikeway_data::split_fields;
///
/// assert_eq!(split_fields("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
/// assert_eq!(split_fields(""), vec![""]);
/// ```
#[must_use]
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            QUOTE => quoted = !quoted,
            DELIMITER if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
