use std::io::Read;

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;

use crate::constants::NULL_MARKERS;
use crate::error::Result;

/// A raw table as delivered by an extractor: a header row and string cells,
/// where `None` marks a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with missing cells and truncating long ones.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matching header names after trimming.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut table = RawTable::new(headers);

        for record in rdr.records() {
            let record = record?;
            table.push_row(record.iter().map(parse_cell).collect());
        }

        Ok(table)
    }

    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// Serialize as comma-separated text with a header row; missing cells are empty.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut wtr = WriterBuilder::new().from_writer(Vec::new());
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        into_bytes(wtr)
    }
}

/// Interpret a CSV cell, mapping the conventional null spellings to `None`.
pub fn parse_cell(raw: &str) -> Option<String> {
    if NULL_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Row type of an output table with a fixed column layout.
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// Serialize typed rows as CSV. The header is always written, even for an empty table.
pub fn rows_to_csv_bytes<T: TableRow>(rows: &[T]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(T::COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    into_bytes(wtr)
}

fn into_bytes(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    wtr.into_inner()
        .map_err(|e| crate::error::EtlError::Io(e.into_error()))
}
