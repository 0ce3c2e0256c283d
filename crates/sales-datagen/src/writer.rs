//! Writers for generated datasets.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use sales_etl::records::ProductRecord;

use crate::error::{GenError, Result};

/// A file written by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub bytes: u64,
    pub rows: usize,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, bytes: u64, rows: usize) -> Self {
        Self {
            path: path.into(),
            bytes,
            rows,
        }
    }
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }
    File::create(path).map_err(|e| GenError::io(path, e))
}

fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| GenError::io(path, e))
}

/// Write rows as CSV with a header taken from the row type's field names.
pub fn write_sales_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<GeneratedFile> {
    let path = path.as_ref();
    let csv_err = |source| GenError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_writer(BufWriter::new(create(path)?));
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| GenError::io(path, e))?;
    drop(writer);

    tracing::debug!(path = %path.display(), rows = rows.len(), "Wrote CSV");
    Ok(GeneratedFile::new(path, file_size(path)?, rows.len()))
}

/// Write products as a pretty-printed flat JSON array.
pub fn write_products_json(path: impl AsRef<Path>, products: &[ProductRecord]) -> Result<GeneratedFile> {
    let path = path.as_ref();
    let mut out = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut out, products)?;
    out.flush().map_err(|e| GenError::io(path, e))?;
    drop(out);

    Ok(GeneratedFile::new(path, file_size(path)?, products.len()))
}

/// Write any JSON value, pretty-printed. Counts as one row.
pub fn write_json(path: impl AsRef<Path>, value: &serde_json::Value) -> Result<GeneratedFile> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(value)?;
    create(path)?
        .write_all(content.as_bytes())
        .map_err(|e| GenError::io(path, e))?;
    Ok(GeneratedFile::new(path, content.len() as u64, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        name: &'static str,
    }

    #[test]
    fn test_write_csv_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/rows.csv");
        let file = write_sales_csv(&path, &[Row { id: 1, name: "a" }, Row { id: 2, name: "b" }])
            .unwrap();

        assert_eq!(file.rows, 2);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,name\n1,a\n2,b\n");
        assert_eq!(file.bytes, content.len() as u64);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let file = write_json(&path, &serde_json::json!({"a": [1, 2]})).unwrap();

        assert_eq!(file.rows, 1);
        let back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["a"][1], 2);
    }
}
