//! Derived analysis tables computed from the loaded base tables.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use sales_core::profit::round2;
use sales_core::{CoreError, Money, ProductId};
use sales_store::Warehouse;

use crate::error::Result;
use crate::records::{MonthlySales, ProductPerformance, ProductRecord, SaleRecord};
use crate::schema;

/// Build `monthly_sales` and `product_performance`, replacing any previous
/// versions.
pub fn create_derived_tables(wh: &mut Warehouse) -> Result<()> {
    tracing::info!("Creating derived tables...");

    let sales: Vec<SaleRecord> = wh.query_as(schema::SALES)?;
    let products: Vec<ProductRecord> = wh.query_as(schema::PRODUCTS)?;

    let monthly = monthly_sales(&sales)?;
    wh.create_table(schema::monthly_sales());
    wh.insert_records(schema::MONTHLY_SALES, &monthly)?;

    let performance = product_performance(&products, &sales)?;
    wh.create_table(schema::product_performance());
    wh.insert_records(schema::PRODUCT_PERFORMANCE, &performance)?;

    tracing::info!(
        monthly_rows = monthly.len(),
        product_rows = performance.len(),
        "Derived tables created successfully"
    );
    Ok(())
}

#[derive(Default)]
struct Totals {
    transactions: i64,
    revenue: Money,
    priced: i64,
    quantity: i64,
}

impl Totals {
    fn add(&mut self, sale: &SaleRecord) -> Result<()> {
        self.transactions += 1;
        if let Some(amount) = sale.total_amount {
            self.revenue = self.revenue.checked_add(&amount)?;
            self.priced += 1;
        }
        if let Some(quantity) = sale.quantity {
            self.quantity = self
                .quantity
                .checked_add(quantity)
                .ok_or(CoreError::Overflow)?;
        }
        Ok(())
    }

    fn average(&self) -> Option<f64> {
        (self.priced > 0).then(|| round2(self.revenue.to_decimal() / self.priced as f64))
    }
}

/// Sales grouped by (year, month, region), in that order.
///
/// Transactions without a sale date cannot be placed in a month and are
/// skipped. Missing amounts and quantities are left out of the sums and the
/// average.
///
/// # Errors
///
/// Returns [`CoreError::Overflow`] when a group's revenue or quantity does
/// not fit in 64 bits.
pub fn monthly_sales(sales: &[SaleRecord]) -> Result<Vec<MonthlySales>> {
    let mut groups: BTreeMap<(i32, u32, Option<String>), Totals> = BTreeMap::new();

    for sale in sales {
        let Some(date) = sale.sale_date else {
            continue;
        };
        groups
            .entry((date.year(), date.month(), sale.region.clone()))
            .or_default()
            .add(sale)?;
    }

    let rows = groups
        .into_iter()
        .map(|((year, month, region), t)| MonthlySales {
            year: i64::from(year),
            month: i64::from(month),
            region,
            transaction_count: t.transactions,
            total_revenue: t.revenue.to_decimal(),
            avg_transaction_value: t.average(),
            total_quantity: t.quantity,
        })
        .collect();
    Ok(rows)
}

/// Sales totals for every product, including products that never sold.
///
/// `avg_selling_price` is the mean unit price over the product's priced
/// sales. `margin_percent` compares it to cost and is `None` when the product
/// has no priced sales or no cost.
pub fn product_performance(
    products: &[ProductRecord],
    sales: &[SaleRecord],
) -> Result<Vec<ProductPerformance>> {
    #[derive(Default)]
    struct Acc {
        totals: Totals,
        price_sum: Money,
        price_count: i64,
    }

    let mut by_product: HashMap<&ProductId, Acc> = HashMap::new();
    for sale in sales {
        let Some(product_id) = &sale.product_id else {
            continue;
        };
        let acc = by_product.entry(product_id).or_default();
        acc.totals.add(sale)?;
        if let Some(price) = sale.unit_price {
            acc.price_sum = acc.price_sum.checked_add(&price)?;
            acc.price_count += 1;
        }
    }

    let rows = products
        .iter()
        .map(|p| {
            let acc = by_product.get(&p.product_id);
            let avg_cents = acc
                .filter(|a| a.price_count > 0)
                .map(|a| a.price_sum.amount_cents as f64 / a.price_count as f64);
            let cost = p.cost.filter(|c| !c.is_zero());
            let margin_percent = avg_cents.zip(cost).map(|(avg, cost)| {
                let cost = cost.amount_cents as f64;
                round2((avg - cost) / cost * 100.0)
            });

            ProductPerformance {
                product_id: p.product_id.clone(),
                name: p.name.clone(),
                category: p.category.clone(),
                brand: p.brand.clone(),
                transaction_count: acc.map_or(0, |a| a.totals.transactions),
                total_revenue: acc.map_or(0.0, |a| a.totals.revenue.to_decimal()),
                total_quantity_sold: acc.map_or(0, |a| a.totals.quantity),
                avg_selling_price: avg_cents.map(|c| round2(c / 100.0)),
                cost: p.cost.map(|c| c.to_decimal()),
                margin_percent,
            }
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use chrono::NaiveDate;
    use sales_core::TransactionId;

    fn sale(id: &str, product: &str, date: Option<(i32, u32, u32)>, qty: i64, price: f64) -> SaleRecord {
        SaleRecord {
            transaction_id: TransactionId::new(id),
            product_id: Some(ProductId::new(product)),
            customer_id: None,
            sale_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            quantity: Some(qty),
            unit_price: Some(Money::usd(price)),
            total_amount: Some(Money::usd(price * qty as f64)),
            region: Some("North".into()),
            sales_rep: None,
            channel: None,
        }
    }

    fn product(id: &str, cost: f64) -> ProductRecord {
        ProductRecord {
            product_id: ProductId::new(id),
            name: Some(id.to_lowercase()),
            category: None,
            subcategory: None,
            brand: None,
            cost: Some(Money::usd(cost)),
            price: None,
            margin: None,
        }
    }

    #[test]
    fn test_monthly_grouping_and_order() {
        let mut sales = vec![
            sale("T1", "A", Some((2024, 2, 1)), 1, 10.0),
            sale("T2", "A", Some((2024, 1, 5)), 2, 10.0),
            sale("T3", "A", Some((2024, 1, 20)), 1, 5.0),
            sale("T4", "A", None, 9, 99.0),
        ];
        sales[2].region = Some("East".into());

        let rows = monthly_sales(&sales).unwrap();
        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.year, r.month, r.region.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2024, 1, "East".to_string()),
                (2024, 1, "North".to_string()),
                (2024, 2, "North".to_string()),
            ]
        );
        assert_eq!(rows[1].total_revenue, 20.0);
        assert_eq!(rows[1].total_quantity, 2);
        assert_eq!(rows[1].avg_transaction_value, Some(20.0));
    }

    #[test]
    fn test_missing_amounts_excluded_from_average() {
        let mut sales = vec![
            sale("T1", "A", Some((2024, 3, 1)), 1, 10.0),
            sale("T2", "A", Some((2024, 3, 2)), 1, 30.0),
        ];
        sales[1].total_amount = None;
        sales[1].quantity = None;

        let rows = monthly_sales(&sales).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction_count, 2);
        assert_eq!(rows[0].total_revenue, 10.0);
        assert_eq!(rows[0].avg_transaction_value, Some(10.0));
        assert_eq!(rows[0].total_quantity, 1);
    }

    #[test]
    fn test_revenue_overflow_is_an_error() {
        let mut sales = vec![
            sale("T1", "A", Some((2024, 5, 1)), 1, 0.0),
            sale("T2", "A", Some((2024, 5, 2)), 1, 0.0),
        ];
        for s in &mut sales {
            s.total_amount = Some(Money::usd(1e17));
        }

        let err = monthly_sales(&sales).unwrap_err();
        assert!(matches!(err, EtlError::Core(CoreError::Overflow)));

        let err = product_performance(&[product("A", 1.0)], &sales).unwrap_err();
        assert!(matches!(err, EtlError::Core(CoreError::Overflow)));
    }

    #[test]
    fn test_product_performance_left_join() {
        let products = vec![product("A", 8.0), product("B", 5.0), product("C", 0.0)];
        let sales = vec![
            sale("T1", "A", Some((2024, 1, 1)), 2, 10.0),
            sale("T2", "A", Some((2024, 1, 2)), 1, 12.0),
            sale("T3", "C", Some((2024, 1, 3)), 1, 4.0),
            sale("T4", "Z", Some((2024, 1, 4)), 1, 4.0),
        ];

        let rows = product_performance(&products, &sales).unwrap();
        assert_eq!(rows.len(), 3);

        let a = &rows[0];
        assert_eq!(a.transaction_count, 2);
        assert_eq!(a.total_revenue, 32.0);
        assert_eq!(a.total_quantity_sold, 3);
        assert_eq!(a.avg_selling_price, Some(11.0));
        assert_eq!(a.margin_percent, Some(37.5));

        let b = &rows[1];
        assert_eq!(b.transaction_count, 0);
        assert_eq!(b.total_revenue, 0.0);
        assert!(b.avg_selling_price.is_none());
        assert!(b.margin_percent.is_none());

        // zero cost has no margin
        assert!(rows[2].margin_percent.is_none());
        assert_eq!(rows[2].avg_selling_price, Some(4.0));
    }

    #[test]
    fn test_create_derived_tables() {
        let mut wh = Warehouse::new();
        for s in schema::base_tables() {
            wh.create_table(s);
        }
        wh.insert_records(schema::PRODUCTS, &[product("A", 8.0)]).unwrap();
        wh.insert_records(
            schema::SALES,
            &[
                sale("T1", "A", Some((2024, 1, 1)), 2, 10.0),
                sale("T2", "A", Some((2024, 2, 1)), 1, 12.0),
            ],
        )
        .unwrap();

        create_derived_tables(&mut wh).unwrap();
        assert_eq!(wh.count(schema::MONTHLY_SALES).unwrap(), 2);
        assert_eq!(wh.count(schema::PRODUCT_PERFORMANCE).unwrap(), 1);

        let perf: Vec<ProductPerformance> = wh.query_as(schema::PRODUCT_PERFORMANCE).unwrap();
        assert_eq!(perf[0].total_quantity_sold, 3);

        // running again replaces rather than appends
        create_derived_tables(&mut wh).unwrap();
        assert_eq!(wh.count(schema::MONTHLY_SALES).unwrap(), 2);
    }
}
