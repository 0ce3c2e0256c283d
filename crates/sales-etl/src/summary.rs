//! Summary statistics of loaded data.

use std::fmt;

use serde::Serialize;
use sales_core::profit::round2;
use sales_store::{TableInfo, Warehouse};

use crate::error::Result;
use crate::schema;

/// Row counts, sales period and revenue of the loaded data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub sales: usize,
    pub products: usize,
    pub regions: usize,
    /// `"<first> to <last>"`, or `None` when no sale has a date.
    pub sales_date_range: Option<String>,
    /// `None` when no sale has an amount.
    pub total_revenue: Option<f64>,
    pub tables: Vec<TableInfo>,
}

impl fmt::Display for DataSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sales: {}", self.sales)?;
        writeln!(f, "products: {}", self.products)?;
        writeln!(f, "regions: {}", self.regions)?;
        writeln!(
            f,
            "sales_date_range: {}",
            self.sales_date_range.as_deref().unwrap_or("n/a")
        )?;
        match self.total_revenue {
            Some(revenue) => write!(f, "total_revenue: {:.2}", revenue),
            None => write!(f, "total_revenue: n/a"),
        }
    }
}

/// Summarize the base tables. A base table that was never created counts as
/// empty.
pub fn summarize(wh: &Warehouse) -> Result<DataSummary> {
    let count = |table: &str| -> Result<usize> {
        if wh.has_table(table) {
            Ok(wh.count(table)?)
        } else {
            Ok(0)
        }
    };

    let (sales_date_range, total_revenue) = if wh.has_table(schema::SALES) {
        let range = wh
            .min_max(schema::SALES, "sale_date")?
            .map(|(first, last)| format!("{} to {}", first, last));
        let revenue = wh.sum_real(schema::SALES, "total_amount")?.map(round2);
        (range, revenue)
    } else {
        (None, None)
    };

    Ok(DataSummary {
        sales: count(schema::SALES)?,
        products: count(schema::PRODUCTS)?,
        regions: count(schema::REGIONS)?,
        sales_date_range,
        total_revenue,
        tables: wh.tables(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_store::row;

    #[test]
    fn test_summarize() {
        let mut wh = Warehouse::new();
        for s in schema::base_tables() {
            wh.create_table(s);
        }
        for (id, date, amount) in [("T1", "2024-03-05", 10.10), ("T2", "2024-01-02", 20.20)] {
            wh.insert_row(
                schema::SALES,
                row![id, "P", "C", date, 1, amount, amount, "North", "Alice"],
            )
            .unwrap();
        }

        let summary = summarize(&wh).unwrap();
        assert_eq!(summary.sales, 2);
        assert_eq!(summary.products, 0);
        assert_eq!(
            summary.sales_date_range.as_deref(),
            Some("2024-01-02 to 2024-03-05")
        );
        assert_eq!(summary.total_revenue, Some(30.3));
        assert_eq!(summary.tables.len(), 3);
        assert!(summary.to_string().contains("total_revenue: 30.30"));
    }

    #[test]
    fn test_summarize_empty_warehouse() {
        let summary = summarize(&Warehouse::new()).unwrap();
        assert_eq!(summary.sales, 0);
        assert!(summary.sales_date_range.is_none());
        assert!(summary.total_revenue.is_none());
        assert!(summary.tables.is_empty());
    }
}
