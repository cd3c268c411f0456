//! Flat-file feature store.
//!
//! One image per record: `id,v0,v1,...` with no header row. Identifiers are
//! quoted when they contain delimiters. Values are written with the shortest
//! representation that parses back to the same `f32`.

use cbir::CorpusEntry;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("feature store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("feature store CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    Parse { line: u64, reason: String },
}

/// Creates a headerless CSV writer for feature rows.
pub fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(inner)
}

/// Writes one feature row.
pub fn append<W: Write>(
    writer: &mut csv::Writer<W>,
    id: &str,
    vector: &[f32],
) -> Result<(), StoreError> {
    let mut record = csv::StringRecord::with_capacity(id.len() + vector.len() * 8, vector.len() + 1);
    record.push_field(id);
    for value in vector {
        record.push_field(&value.to_string());
    }
    writer.write_record(&record)?;
    Ok(())
}

/// Reads every row; blank lines are ignored.
pub fn read_all<R: Read>(reader: R) -> Result<Vec<CorpusEntry>, StoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|err| match err.position() {
            Some(pos) => StoreError::Parse {
                line: pos.line(),
                reason: err.to_string(),
            },
            None => StoreError::Csv(err),
        })?;
        let line = record.position().map_or(0, |pos| pos.line());

        let id = record.get(0).unwrap_or_default();
        if id.is_empty() {
            return Err(StoreError::Parse {
                line,
                reason: "missing identifier".to_owned(),
            });
        }
        let vector = record
            .iter()
            .skip(1)
            .map(|field| {
                field.trim().parse::<f32>().map_err(|err| StoreError::Parse {
                    line,
                    reason: format!("invalid value {field:?}: {err}"),
                })
            })
            .collect::<Result<Vec<f32>, _>>()?;
        entries.push(CorpusEntry::new(id, vector));
    }
    Ok(entries)
}

/// Opens `path` for writing, truncating any previous contents.
pub fn create(path: &Path) -> Result<csv::Writer<File>, StoreError> {
    Ok(writer(File::create(path)?))
}

/// Loads every row of the store at `path`.
pub fn load(path: &Path) -> Result<Vec<CorpusEntry>, StoreError> {
    read_all(File::open(path)?)
}
