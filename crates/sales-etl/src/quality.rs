//! Data quality checks, over the loaded warehouse and over raw sales files.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use sales_core::profit::round2;
use sales_store::{Value, Warehouse};

use crate::error::{EtlError, Result};
use crate::schema;

/// Columns that must not contain nulls.
const REQUIRED_COLUMNS: [(&str, &str); 5] = [
    (schema::SALES, "product_id"),
    (schema::SALES, "customer_id"),
    (schema::SALES, "total_amount"),
    (schema::PRODUCTS, "product_id"),
    (schema::PRODUCTS, "name"),
];

/// What kind of problem a column has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NullValues,
    NegativeValues,
    FutureDates,
}

impl IssueKind {
    fn describe(&self) -> &'static str {
        match self {
            IssueKind::NullValues => "null values",
            IssueKind::NegativeValues => "negative values",
            IssueKind::FutureDates => "future dates",
        }
    }
}

/// A data quality problem in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityIssue {
    pub table: String,
    pub column: String,
    pub kind: IssueKind,
    pub count: usize,
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: {} {}",
            self.table,
            self.column,
            self.count,
            self.kind.describe()
        )
    }
}

/// Run the quality checks against loaded data.
///
/// Checks for nulls in key columns, negative sale amounts and sale dates
/// after `today`. Only problems with a non-zero count are returned.
pub fn validate_data_quality(wh: &Warehouse, today: NaiveDate) -> Result<Vec<QualityIssue>> {
    tracing::info!("Running data quality checks...");

    let mut issues = Vec::new();
    let mut push = |table: &str, column: &str, kind: IssueKind, count: usize| {
        if count > 0 {
            issues.push(QualityIssue {
                table: table.to_string(),
                column: column.to_string(),
                kind,
                count,
            });
        }
    };

    for (table, column) in REQUIRED_COLUMNS {
        push(table, column, IssueKind::NullValues, wh.count_nulls(table, column)?);
    }

    let negative = wh.count_where(schema::SALES, "total_amount", |v| {
        v.as_real().is_some_and(|amount| amount < 0.0)
    })?;
    push(schema::SALES, "total_amount", IssueKind::NegativeValues, negative);

    let future = wh.count_where(schema::SALES, "sale_date", |v: &Value| {
        v.as_date().is_some_and(|d| d > today)
    })?;
    push(schema::SALES, "sale_date", IssueKind::FutureDates, future);

    if issues.is_empty() {
        tracing::info!("All data quality checks passed");
    } else {
        let described: Vec<String> = issues.iter().map(ToString::to_string).collect();
        tracing::warn!("Data quality issues found: {:?}", described);
    }
    Ok(issues)
}

/// Cell contents treated as missing.
const MISSING_MARKERS: [&str; 7] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingValues {
    pub column: String,
    pub count: usize,
}

/// Profile of a sales CSV file.
///
/// Works on any CSV with a header row. Business metrics are `None` when the
/// file has no column to compute them from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesFileReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub file_size_mb: f64,
    /// Rows identical to an earlier row.
    pub duplicate_rows: usize,
    /// Per column, in file order.
    pub missing_values: Vec<MissingValues>,
    pub unique_customers: usize,
    pub unique_products: usize,
    /// Rows with `quantity <= 0`.
    pub non_positive_quantities: Option<usize>,
    /// Rows with `total_amount <= 0`.
    pub non_positive_amounts: Option<usize>,
    pub total_revenue: Option<f64>,
}

impl SalesFileReport {
    pub fn total_missing(&self) -> usize {
        self.missing_values.iter().map(|m| m.count).sum()
    }
}

/// Profile a sales CSV file without loading it into the warehouse.
pub fn analyze_sales_file(path: impl AsRef<Path>) -> Result<SalesFileReport> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EtlError::MissingInput(path.to_path_buf()),
        _ => EtlError::io(path, e),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| EtlError::csv(path, e))?;
    let headers = reader.headers().map_err(|e| EtlError::csv(path, e))?.clone();
    let index = |name: &str| headers.iter().position(|h| h == name);
    let customer_col = index("customer_id");
    let product_col = index("product_id");
    let quantity_col = index("quantity");
    let amount_col = index("total_amount");

    let mut missing = vec![0usize; headers.len()];
    let mut seen_rows: HashSet<Vec<String>> = HashSet::new();
    let mut customers: HashSet<String> = HashSet::new();
    let mut products: HashSet<String> = HashSet::new();
    let mut total_rows = 0;
    let mut duplicate_rows = 0;
    let mut non_positive_quantities = 0;
    let mut non_positive_amounts = 0;
    let mut revenue = 0.0;

    for record in reader.records() {
        let record = record.map_err(|e| EtlError::csv(path, e))?;
        total_rows += 1;

        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        for (i, cell) in cells.iter().enumerate() {
            if is_missing(cell) {
                missing[i] += 1;
            }
        }

        let cell = |col: Option<usize>| {
            col.and_then(|i| cells.get(i))
                .map(String::as_str)
                .filter(|c| !is_missing(c))
        };
        let number = |col| cell(col).and_then(|c| c.parse::<f64>().ok());

        if let Some(c) = cell(customer_col) {
            customers.insert(c.to_string());
        }
        if let Some(p) = cell(product_col) {
            products.insert(p.to_string());
        }
        if number(quantity_col).is_some_and(|q| q <= 0.0) {
            non_positive_quantities += 1;
        }
        if let Some(amount) = number(amount_col) {
            if amount <= 0.0 {
                non_positive_amounts += 1;
            }
            revenue += amount;
        }

        if !seen_rows.insert(cells) {
            duplicate_rows += 1;
        }
    }

    let report = SalesFileReport {
        total_rows,
        total_columns: headers.len(),
        file_size_mb: round2(metadata.len() as f64 / (1024.0 * 1024.0)),
        duplicate_rows,
        missing_values: headers
            .iter()
            .zip(missing)
            .map(|(column, count)| MissingValues {
                column: column.to_string(),
                count,
            })
            .collect(),
        unique_customers: customers.len(),
        unique_products: products.len(),
        non_positive_quantities: quantity_col.map(|_| non_positive_quantities),
        non_positive_amounts: amount_col.map(|_| non_positive_amounts),
        total_revenue: amount_col.map(|_| round2(revenue)),
    };

    tracing::debug!(
        path = %path.display(),
        rows = report.total_rows,
        duplicates = report.duplicate_rows,
        "Analyzed sales file"
    );
    Ok(report)
}
