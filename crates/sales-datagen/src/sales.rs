//! Synthetic sales transactions.

use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sales_core::money::{self, Money};
use sales_core::{padded_key, CustomerId, ProductId, TransactionId};
use sales_etl::loaders::read_sales_csv;
use sales_etl::records::SaleRecord;

use crate::error::{GenError, Result};
use crate::sampling::{exponential, normal, pick, poisson, stable_hash};
use crate::DEFAULT_SEED;

const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];
const CHANNELS: [&str; 4] = ["online", "retail", "wholesale", "mobile"];
const SALES_REPS: [&str; 6] = [
    "Alice Johnson",
    "Bob Chen",
    "Carol Davis",
    "David Wilson",
    "Eva Martinez",
    "Frank Lee",
];

/// Parameters for [`generate_large_sales`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeSalesConfig {
    pub target_rows: usize,
    pub seed: u64,
    /// Rows generated between progress reports.
    pub chunk_size: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for LargeSalesConfig {
    fn default() -> Self {
        Self {
            target_rows: 50_000,
            seed: DEFAULT_SEED,
            chunk_size: 10_000,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        }
    }
}

impl LargeSalesConfig {
    pub fn with_rows(target_rows: usize) -> Self {
        Self {
            target_rows,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(GenError::InvalidConfig("chunk_size must be positive".into()));
        }
        if self.end_date < self.start_date {
            return Err(GenError::InvalidConfig(format!(
                "end_date {} is before start_date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}

/// One generated transaction, in the column order of the large sales file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeSale {
    pub transaction_id: TransactionId,
    pub date: NaiveDate,
    pub product_id: ProductId,
    pub customer_id: CustomerId,
    pub quantity: i64,
    pub region: String,
    pub sales_rep: String,
    pub channel: String,
    #[serde(with = "money::decimal")]
    pub unit_price: Money,
    #[serde(with = "money::decimal")]
    pub total_amount: Money,
}

/// Stable base price for a product, 10..=209 dollars.
fn base_price(product: &str) -> f64 {
    (stable_hash(product) % 200 + 10) as f64
}

/// Generate the large sales dataset.
pub fn generate_large_sales(config: &LargeSalesConfig) -> Result<Vec<LargeSale>> {
    generate_large_sales_with_progress(config, |_, _| {})
}

/// Like [`generate_large_sales`], calling `progress(rows_done, target_rows)`
/// after every chunk.
pub fn generate_large_sales_with_progress<F>(
    config: &LargeSalesConfig,
    mut progress: F,
) -> Result<Vec<LargeSale>>
where
    F: FnMut(usize, usize),
{
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let products: Vec<String> = (0..20).map(|i| format!("PRD_{}", 100 + i)).collect();
    let day_span = (config.end_date - config.start_date).num_days();

    let mut rows = Vec::with_capacity(config.target_rows);
    for chunk_start in (0..config.target_rows).step_by(config.chunk_size) {
        let chunk_end = (chunk_start + config.chunk_size).min(config.target_rows);
        tracing::debug!(
            chunk = chunk_start / config.chunk_size + 1,
            "Generating rows {} to {}",
            chunk_start,
            chunk_end
        );

        for i in chunk_start..chunk_end {
            let product = pick(&mut rng, &products);
            let quantity = poisson(&mut rng, 3.0) as i64 + 1;
            let price = (base_price(product) * normal(&mut rng, 1.0, 0.1)).max(5.0);
            let unit_price = Money::usd(price);

            rows.push(LargeSale {
                transaction_id: TransactionId::new(padded_key("TXN", i as u64, 8)),
                date: config.start_date + Duration::days(rng.gen_range(0..=day_span)),
                product_id: ProductId::new(product.as_str()),
                customer_id: CustomerId::new(format!("CUST_{}", rng.gen_range(1000..=9999))),
                quantity,
                region: pick(&mut rng, &REGIONS).to_string(),
                sales_rep: pick(&mut rng, &SALES_REPS).to_string(),
                channel: pick(&mut rng, &CHANNELS).to_string(),
                unit_price,
                total_amount: unit_price.multiply_decimal(quantity as f64),
            });
        }
        progress(chunk_end, config.target_rows);
    }

    // stable: equal dates keep transaction order
    rows.sort_by_key(|r| r.date);
    Ok(rows)
}

const SEASONAL_REPS: [&str; 20] = [
    "Alice Cooper",
    "Bob Wilson",
    "Carol Davis",
    "Dan Brown",
    "Eva Martinez",
    "Frank Thompson",
    "Grace Lee",
    "Henry Wang",
    "Isabel Garcia",
    "Jack Smith",
    "Kate Johnson",
    "Liam O'Connor",
    "Maya Patel",
    "Noah Kim",
    "Olivia Zhang",
    "Paul Anderson",
    "Quinn Taylor",
    "Rachel Green",
    "Sam Miller",
    "Tina Liu",
];
const SEASONAL_REGIONS: [&str; 10] = [
    "NA_EAST",
    "NA_WEST",
    "NA_CENTRAL",
    "EU_NORTH",
    "EU_CENTRAL",
    "EU_SOUTH",
    "APAC_EAST",
    "APAC_SOUTH",
    "LATAM",
    "MEA",
];
/// Small quantities are more common.
const BASE_QUANTITIES: [i64; 13] = [1, 1, 1, 2, 2, 3, 4, 5, 6, 7, 8, 9, 10];
const SEASONAL_DAYS: i64 = 730;

fn season_multiplier(date: NaiveDate) -> f64 {
    match date.month() {
        11 | 12 => 1.5,
        6..=8 => 1.2,
        _ => 1.0,
    }
}

const DEFAULT_PRICE_RANGE: (f64, f64) = (10.0, 500.0);

/// Identifiers and prices that seasonal sales are drawn from.
///
/// [`SalesPatterns::default`] is a fixed catalog of 200 products, 2000
/// customers and ten market regions priced 10..500 dollars. The other
/// constructors take these from an existing sales file instead, keeping the
/// defaults for anything the file does not carry.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesPatterns {
    pub products: Vec<ProductId>,
    pub customers: Vec<CustomerId>,
    pub regions: Vec<String>,
    /// Lowest and highest unit price in dollars.
    pub price_range: (f64, f64),
}

impl Default for SalesPatterns {
    fn default() -> Self {
        Self {
            products: (1..=200)
                .map(|i| ProductId::new(padded_key("PROD", i, 4)))
                .collect(),
            customers: (1..=2000)
                .map(|i| CustomerId::new(padded_key("CUST", i, 5)))
                .collect(),
            regions: SEASONAL_REGIONS.iter().map(|r| r.to_string()).collect(),
            price_range: DEFAULT_PRICE_RANGE,
        }
    }
}

/// Distinct values in first-seen order.
fn distinct<T: Clone + Eq + Hash>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

impl SalesPatterns {
    /// Take products, customers, regions and the unit price range from
    /// existing transactions.
    pub fn from_sales(sales: &[SaleRecord]) -> Self {
        let prices = sales.iter().filter_map(|s| s.unit_price);
        let price_range = match (prices.clone().min(), prices.max()) {
            (Some(lo), Some(hi)) => (lo.to_decimal(), hi.to_decimal()),
            _ => DEFAULT_PRICE_RANGE,
        };

        Self {
            products: distinct(sales.iter().filter_map(|s| s.product_id.clone())),
            customers: distinct(sales.iter().filter_map(|s| s.customer_id.clone())),
            regions: distinct(sales.iter().filter_map(|s| s.region.clone())),
            price_range,
        }
        .or_defaults()
    }

    /// Replace empty lists and an unusable price range with the defaults.
    fn or_defaults(&self) -> Self {
        let defaults = Self::default();
        let (lo, hi) = self.price_range;

        Self {
            products: if self.products.is_empty() {
                defaults.products
            } else {
                self.products.clone()
            },
            customers: if self.customers.is_empty() {
                defaults.customers
            } else {
                self.customers.clone()
            },
            regions: if self.regions.is_empty() {
                defaults.regions
            } else {
                self.regions.clone()
            },
            price_range: if lo.is_finite() && hi.is_finite() && lo <= hi {
                self.price_range
            } else {
                defaults.price_range
            },
        }
    }

    /// Read patterns from a sales CSV, or use the defaults when the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be parsed.
    pub fn from_sales_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No sales file at {}, using default patterns", path.display());
            return Ok(Self::default());
        }

        let sales = read_sales_csv(path)?;
        let patterns = Self::from_sales(&sales);
        tracing::info!(
            products = patterns.products.len(),
            customers = patterns.customers.len(),
            regions = patterns.regions.len(),
            "Read sales patterns from {}",
            path.display()
        );
        Ok(patterns)
    }

    /// Unit price for a product, fixed for a given product id.
    fn price(&self, product: &ProductId) -> Money {
        let (lo, hi) = self.price_range;
        let mut rng = StdRng::seed_from_u64(stable_hash(product.as_str()) % 1000);
        Money::usd(rng.gen_range(lo..=hi))
    }
}

/// Generate `n` transactions over the two years ending at `end_date`, using
/// the default [`SalesPatterns`].
pub fn generate_seasonal_sales(n: usize, end_date: NaiveDate, seed: u64) -> Vec<SaleRecord> {
    generate_seasonal_sales_with(&SalesPatterns::default(), n, end_date, seed)
}

/// Generate `n` transactions over the two years ending at `end_date`.
///
/// Dates skew toward `end_date`. Holiday months sell 1.5x the quantity and
/// summer months 1.2x. Rows come back sorted by date.
pub fn generate_seasonal_sales_with(
    patterns: &SalesPatterns,
    n: usize,
    end_date: NaiveDate,
    seed: u64,
) -> Vec<SaleRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let patterns = patterns.or_defaults();

    let mut rows: Vec<SaleRecord> = (0..n)
        .map(|i| {
            let days_back = exponential(&mut rng, 365.0) as i64 % SEASONAL_DAYS;
            let sale_date = end_date - Duration::days(days_back);
            let product = pick(&mut rng, &patterns.products).clone();
            let base = *pick(&mut rng, &BASE_QUANTITIES);
            let quantity = ((base as f64 * season_multiplier(sale_date)) as i64).max(1);
            let unit_price = patterns.price(&product);

            SaleRecord {
                transaction_id: TransactionId::new(format!("TXN_{:06}", 100_000 + i)),
                product_id: Some(product),
                customer_id: Some(pick(&mut rng, &patterns.customers).clone()),
                sale_date: Some(sale_date),
                quantity: Some(quantity),
                unit_price: Some(unit_price),
                total_amount: Some(unit_price.multiply_decimal(quantity as f64)),
                region: Some(pick(&mut rng, &patterns.regions).clone()),
                sales_rep: Some(pick(&mut rng, &SEASONAL_REPS).to_string()),
                channel: None,
            }
        })
        .collect();

    rows.sort_by_key(|r| r.sale_date);
    rows
}
