//! Parquet encoding and decoding helpers.
//!
//! Files are written as a single record batch with a `created_by` key in the
//! footer. Readers look columns up by name, so column order in the file does
//! not matter and extra columns are ignored.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array as _, Float64Array, StringArray};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;

use crate::error::{EtlError, Result};

fn writer_properties() -> WriterProperties {
    let created_by = KeyValue {
        key: "created_by".to_string(),
        value: Some("saleslab".to_string()),
    };
    WriterProperties::builder()
        .set_key_value_metadata(Some(vec![created_by]))
        .build()
}

/// Encode one record batch as a Parquet file.
pub fn write_single_batch(schema: Arc<Schema>, batch: &RecordBatch) -> Result<Bytes> {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    let mut writer = ArrowWriter::try_new(&mut cursor, schema, Some(writer_properties()))
        .map_err(|e| EtlError::parquet(format!("parquet writer init failed: {e}")))?;
    writer
        .write(batch)
        .map_err(|e| EtlError::parquet(format!("parquet write failed: {e}")))?;
    writer
        .close()
        .map_err(|e| EtlError::parquet(format!("parquet close failed: {e}")))?;
    Ok(Bytes::from(cursor.into_inner()))
}

/// Decode every record batch of a Parquet file.
pub fn read_batches(bytes: &Bytes) -> Result<Vec<RecordBatch>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes.clone())
        .map_err(|e| EtlError::parquet(format!("parquet reader init failed: {e}")))?
        .build()
        .map_err(|e| EtlError::parquet(format!("parquet reader build failed: {e}")))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| EtlError::parquet(format!("parquet read batch failed: {e}")))?;
        batches.push(batch);
    }
    Ok(batches)
}

/// Read a whole file into memory.
pub fn read_file(path: &Path) -> Result<Bytes> {
    if !path.exists() {
        return Err(EtlError::MissingInput(path.to_path_buf()));
    }
    std::fs::read(path)
        .map(Bytes::from)
        .map_err(|e| EtlError::io(path, e))
}

/// Write bytes to a file, creating the parent directory.
pub fn write_file(path: &Path, bytes: &Bytes) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EtlError::io(parent, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| EtlError::io(path, e))
}

fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str, kind: &str) -> Result<&'a T> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|e| EtlError::parquet(format!("missing column '{name}': {e}")))?;

    batch
        .column(idx)
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| EtlError::parquet(format!("column '{name}' is not {kind}")))
}

pub fn col_string<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    column(batch, name, "StringArray")
}

pub fn col_f64<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    column(batch, name, "Float64Array")
}

/// String value at `row`, or `None` when null.
pub fn opt_str(col: &StringArray, row: usize) -> Option<&str> {
    if col.is_null(row) {
        None
    } else {
        Some(col.value(row))
    }
}
