//! Table layouts used by the pipeline.

use sales_store::{Column, TableSchema};

pub const SALES: &str = "sales";
pub const PRODUCTS: &str = "products";
pub const REGIONS: &str = "regions";
pub const MONTHLY_SALES: &str = "monthly_sales";
pub const PRODUCT_PERFORMANCE: &str = "product_performance";

/// One row per sales transaction.
pub fn sales() -> TableSchema {
    TableSchema::new(
        SALES,
        vec![
            Column::text("transaction_id").primary_key(),
            Column::text("product_id"),
            Column::text("customer_id"),
            Column::date("sale_date"),
            Column::integer("quantity"),
            Column::real("unit_price"),
            Column::real("total_amount"),
            Column::text("region"),
            Column::text("sales_rep"),
        ],
    )
}

/// One row per product.
pub fn products() -> TableSchema {
    TableSchema::new(
        PRODUCTS,
        vec![
            Column::text("product_id").primary_key(),
            Column::text("name"),
            Column::text("category"),
            Column::text("subcategory"),
            Column::text("brand"),
            Column::real("cost"),
            Column::real("price"),
            Column::real("margin"),
        ],
    )
}

/// One row per sales region.
pub fn regions() -> TableSchema {
    TableSchema::new(
        REGIONS,
        vec![
            Column::text("region_id").primary_key(),
            Column::text("region_name"),
            Column::text("country"),
            Column::text("timezone"),
            Column::text("manager"),
            Column::real("target_revenue"),
        ],
    )
}

/// Sales aggregated per calendar month and region.
pub fn monthly_sales() -> TableSchema {
    TableSchema::new(
        MONTHLY_SALES,
        vec![
            Column::integer("year"),
            Column::integer("month"),
            Column::text("region"),
            Column::integer("transaction_count"),
            Column::real("total_revenue"),
            Column::real("avg_transaction_value"),
            Column::integer("total_quantity"),
        ],
    )
}

/// Sales totals and realised margin per product.
pub fn product_performance() -> TableSchema {
    TableSchema::new(
        PRODUCT_PERFORMANCE,
        vec![
            Column::text("product_id").primary_key(),
            Column::text("name"),
            Column::text("category"),
            Column::text("brand"),
            Column::integer("transaction_count"),
            Column::real("total_revenue"),
            Column::integer("total_quantity_sold"),
            Column::real("avg_selling_price"),
            Column::real("cost"),
            Column::real("margin_percent"),
        ],
    )
}

/// The tables the loaders write into.
pub fn base_tables() -> Vec<TableSchema> {
    vec![sales(), products(), regions()]
}
