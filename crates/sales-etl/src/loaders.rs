//! Readers for the three source files and the warehouse loaders built on them.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use sales_core::{CatalogDocument, Money, Region, RegionId};
use sales_store::Warehouse;

use crate::columnar::{self, col_f64, col_string, opt_str};
use crate::error::{EtlError, Result};
use crate::records::{ProductRecord, SaleRecord};
use crate::schema;

/// Read a sales CSV.
///
/// The file must have a header row. Empty cells become `None`.
pub fn read_sales_csv(path: impl AsRef<Path>) -> Result<Vec<SaleRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EtlError::MissingInput(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| EtlError::csv(path, e))?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<SaleRecord>, _>>()
        .map_err(|e| EtlError::csv(path, e))
}

/// Read products from JSON.
///
/// Accepts either a catalog document (an object with a `catalog` key) or a
/// flat array of product records.
pub fn read_products_json(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EtlError::MissingInput(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| EtlError::io(path, e))?;
    let json_err = |source| EtlError::Json {
        path: path.to_path_buf(),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(&content).map_err(json_err)?;

    if value.get("catalog").is_some() {
        let doc: CatalogDocument = serde_json::from_value(value).map_err(json_err)?;
        tracing::debug!(path = %path.display(), "Reading products from catalog document");
        Ok(doc.products.iter().map(ProductRecord::from).collect())
    } else {
        serde_json::from_value(value).map_err(json_err)
    }
}

fn regions_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("region_id", DataType::Utf8, false),
        Field::new("region_name", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("timezone", DataType::Utf8, false),
        Field::new("manager", DataType::Utf8, false),
        Field::new("target_revenue", DataType::Float64, false),
    ]))
}

/// Encode regions as Parquet.
pub fn encode_regions(regions: &[Region]) -> Result<Bytes> {
    let schema = regions_schema();
    let strings = |f: fn(&Region) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(regions.iter().map(f).collect::<Vec<_>>()))
    };
    let target_revenue: ArrayRef = Arc::new(Float64Array::from(
        regions
            .iter()
            .map(|r| r.target_revenue.to_decimal())
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|r| r.region_id.as_str()),
            strings(|r| r.region_name.as_str()),
            strings(|r| r.country.as_str()),
            strings(|r| r.timezone.as_str()),
            strings(|r| r.manager.as_str()),
            target_revenue,
        ],
    )
    .map_err(|e| EtlError::parquet(format!("record batch build failed: {e}")))?;

    columnar::write_single_batch(schema, &batch)
}

/// Decode regions from Parquet.
pub fn decode_regions(bytes: &Bytes) -> Result<Vec<Region>> {
    let mut out = Vec::new();
    for batch in columnar::read_batches(bytes)? {
        let region_id = col_string(&batch, "region_id")?;
        let region_name = col_string(&batch, "region_name")?;
        let country = col_string(&batch, "country")?;
        let timezone = col_string(&batch, "timezone")?;
        let manager = col_string(&batch, "manager")?;
        let target_revenue = col_f64(&batch, "target_revenue")?;

        let text = |col: &StringArray, row| opt_str(col, row).unwrap_or_default().to_string();
        for row in 0..batch.num_rows() {
            out.push(Region {
                region_id: RegionId::new(text(region_id, row)),
                region_name: text(region_name, row),
                country: text(country, row),
                timezone: text(timezone, row),
                manager: text(manager, row),
                target_revenue: Money::usd(target_revenue.value(row)),
            });
        }
    }
    Ok(out)
}

pub fn write_regions_parquet(path: impl AsRef<Path>, regions: &[Region]) -> Result<u64> {
    let bytes = encode_regions(regions)?;
    columnar::write_file(path.as_ref(), &bytes)?;
    Ok(bytes.len() as u64)
}

pub fn read_regions_parquet(path: impl AsRef<Path>) -> Result<Vec<Region>> {
    decode_regions(&columnar::read_file(path.as_ref())?)
}

/// Load a sales CSV into the `sales` table. Returns the table's row count.
pub fn load_sales(wh: &mut Warehouse, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    tracing::info!("Loading sales data from {}", path.display());
    let records = read_sales_csv(path)?;
    wh.insert_records(schema::SALES, &records)?;
    let count = wh.count(schema::SALES)?;
    tracing::info!("Loaded {} sales records", count);
    Ok(count)
}

/// Load products JSON into the `products` table. Returns the table's row count.
pub fn load_products(wh: &mut Warehouse, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    tracing::info!("Loading products data from {}", path.display());
    let records = read_products_json(path)?;
    wh.insert_records(schema::PRODUCTS, &records)?;
    let count = wh.count(schema::PRODUCTS)?;
    tracing::info!("Loaded {} product records", count);
    Ok(count)
}

/// Load a regions Parquet file into the `regions` table. Returns the table's
/// row count.
pub fn load_regions(wh: &mut Warehouse, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    tracing::info!("Loading regions data from {}", path.display());
    let regions = read_regions_parquet(path)?;
    wh.insert_records(schema::REGIONS, &regions)?;
    let count = wh.count(schema::REGIONS)?;
    tracing::info!("Loaded {} region records", count);
    Ok(count)
}
