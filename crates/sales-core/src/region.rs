//! Sales regions and regional market profiles.

use serde::{Deserialize, Serialize};

use crate::ids::RegionId;
use crate::money::{self, Money};

/// A sales region as loaded into the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: RegionId,
    pub region_name: String,
    pub country: String,
    /// IANA timezone name, e.g. `America/New_York`.
    pub timezone: String,
    pub manager: String,
    #[serde(with = "money::decimal")]
    pub target_revenue: Money,
}

/// Demographic and market profile of a broad geographic region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub region_code: String,
    pub region_name: String,
    pub country: String,
    pub state_province: String,
    pub population: i64,
    pub gdp_per_capita: f64,
    /// Relative market potential, 0.0 - 1.0.
    pub market_potential: f64,
    pub avg_income: i64,
    /// Percent.
    pub unemployment_rate: f64,
    pub major_cities: Vec<String>,
    pub primary_industries: Vec<String>,
    pub climate_zone: String,
    pub time_zone: String,
    /// Fraction, e.g. 0.067.
    pub sales_tax_rate: f64,
    pub business_friendliness_score: f64,
}
