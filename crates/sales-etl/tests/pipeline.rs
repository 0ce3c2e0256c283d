//! Runs the full pipeline over the shipped data files.

use std::path::PathBuf;

use chrono::NaiveDate;
use sales_core::{Money, ProductId, Region, RegionId};
use sales_etl::prelude::*;
use sales_etl::schema;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn region(id: &str, name: &str, target: f64) -> Region {
    Region {
        region_id: RegionId::new(id),
        region_name: name.into(),
        country: "United States".into(),
        timezone: "America/New_York".into(),
        manager: "Sarah Johnson".into(),
        target_revenue: Money::usd(target),
    }
}

fn config(regions_file: PathBuf) -> PipelineConfig {
    PipelineConfig {
        regions_file,
        ..PipelineConfig::with_data_dir(data_dir())
    }
}

#[test]
fn test_pipeline_over_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let regions_file = dir.path().join("regions.parquet");
    write_regions_parquet(
        &regions_file,
        &[
            region("NA_EAST", "North America East", 2_500_000.0),
            region("NA_WEST", "North America West", 3_200_000.0),
        ],
    )
    .unwrap();

    let mut pipeline = SalesPipeline::new(config(regions_file));
    let report = pipeline.run(today()).unwrap();

    assert_eq!(report.summary.sales, 20);
    assert_eq!(report.summary.products, 10);
    assert_eq!(report.summary.regions, 2);
    assert_eq!(report.summary.total_revenue, Some(2574.14));
    assert_eq!(
        report.summary.sales_date_range.as_deref(),
        Some("2024-01-03 to 2024-04-28")
    );

    let issues: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
    assert_eq!(issues, vec!["sales.customer_id: 1 null values"]);

    let wh = pipeline.warehouse();
    assert_eq!(wh.count(schema::MONTHLY_SALES).unwrap(), 16);

    let performance: Vec<ProductPerformance> = wh.query_as(schema::PRODUCT_PERFORMANCE).unwrap();
    assert_eq!(performance.len(), 10);

    let find = |id: &str| {
        performance
            .iter()
            .find(|p| p.product_id == ProductId::new(id))
            .unwrap()
    };
    let best = find("PRD_001");
    assert_eq!(best.transaction_count, 3);
    assert_eq!(best.total_quantity_sold, 3);
    assert_eq!(best.total_revenue, 589.97);
    assert_eq!(best.avg_selling_price, Some(196.66));

    let unsold = find("PRD_008");
    assert_eq!(unsold.transaction_count, 0);
    assert!(unsold.avg_selling_price.is_none());
    assert!(unsold.margin_percent.is_none());
}

#[test]
fn test_pipeline_without_regions_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = SalesPipeline::new(config(dir.path().join("absent.parquet")));

    let report = pipeline.run(today()).unwrap();
    assert_eq!(report.summary.regions, 0);
    assert_eq!(report.summary.sales, 20);
}

#[test]
fn test_future_dates_are_relative_to_today() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = SalesPipeline::new(config(dir.path().join("absent.parquet")));

    let early = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let report = pipeline.run(early).unwrap();
    assert!(report
        .issues
        .iter()
        .any(|i| i.kind == IssueKind::FutureDates && i.count == 5));
}

#[test]
fn test_rerun_replaces_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = SalesPipeline::new(config(dir.path().join("absent.parquet")));

    pipeline.run(today()).unwrap();
    let report = pipeline.run(today()).unwrap();
    assert_eq!(report.summary.sales, 20);
}

#[test]
fn test_analyze_shipped_sales_file() {
    let report = analyze_sales_file(data_dir().join("sales.csv")).unwrap();
    assert_eq!(report.total_rows, 20);
    assert_eq!(report.total_columns, 9);
    assert_eq!(report.duplicate_rows, 0);
    assert_eq!(report.total_missing(), 1);
    assert_eq!(report.unique_customers, 16);
    assert_eq!(report.unique_products, 9);
    assert_eq!(report.total_revenue, Some(2574.14));
}
