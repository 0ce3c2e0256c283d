//! Fixed region data: the pipeline's sales regions and regional market
//! profiles.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use sales_core::{Money, Region, RegionId, RegionProfile};
use sales_etl::{columnar, loaders, EtlError};

use crate::error::Result;
use crate::writer::GeneratedFile;

fn region(id: &str, name: &str, country: &str, timezone: &str, manager: &str, target: f64) -> Region {
    Region {
        region_id: RegionId::new(id),
        region_name: name.to_string(),
        country: country.to_string(),
        timezone: timezone.to_string(),
        manager: manager.to_string(),
        target_revenue: Money::usd(target),
    }
}

/// The ten sales regions loaded into the `regions` table.
pub fn pipeline_regions() -> Vec<Region> {
    const US: &str = "United States";
    const MULTI: &str = "Multiple";
    vec![
        region("NA_EAST", "North America East", US, "America/New_York", "Sarah Johnson", 2_500_000.0),
        region("NA_WEST", "North America West", US, "America/Los_Angeles", "Michael Chen", 2_800_000.0),
        region("NA_CENTRAL", "North America Central", US, "America/Chicago", "David Rodriguez", 2_200_000.0),
        region("EU_NORTH", "Europe North", MULTI, "Europe/Stockholm", "Anna Larsson", 1_800_000.0),
        region("EU_CENTRAL", "Europe Central", MULTI, "Europe/Berlin", "Klaus Mueller", 2_100_000.0),
        region("EU_SOUTH", "Europe South", MULTI, "Europe/Rome", "Maria Rossi", 1_600_000.0),
        region("APAC_EAST", "Asia Pacific East", MULTI, "Asia/Tokyo", "Hiroshi Tanaka", 2_000_000.0),
        region("APAC_SOUTH", "Asia Pacific South", MULTI, "Asia/Singapore", "Li Wei", 1_900_000.0),
        region("LATAM", "Latin America", MULTI, "America/Sao_Paulo", "Carlos Silva", 1_400_000.0),
        region("MEA", "Middle East & Africa", MULTI, "Africa/Johannesburg", "Ahmed Hassan", 1_200_000.0),
    ]
}

/// Write [`pipeline_regions`] as a regions Parquet file.
pub fn write_pipeline_regions(path: impl AsRef<Path>) -> Result<GeneratedFile> {
    let path = path.as_ref();
    let regions = pipeline_regions();
    let bytes = loaders::write_regions_parquet(path, &regions)?;
    Ok(GeneratedFile::new(path, bytes, regions.len()))
}

struct ProfileSeed {
    code: &'static str,
    population: i64,
    gdp_per_capita: f64,
    market_potential: f64,
    avg_income: i64,
    unemployment_rate: f64,
    major_cities: [&'static str; 3],
    primary_industries: [&'static str; 3],
    climate_zone: &'static str,
    time_zone: &'static str,
    sales_tax_rate: f64,
    business_friendliness_score: f64,
}

const PROFILE_SEEDS: [ProfileSeed; 5] = [
    ProfileSeed {
        code: "North",
        population: 15_000_000,
        gdp_per_capita: 55_000.0,
        market_potential: 0.85,
        avg_income: 62_000,
        unemployment_rate: 3.2,
        major_cities: ["Minneapolis", "Detroit", "Milwaukee"],
        primary_industries: ["Manufacturing", "Agriculture", "Technology"],
        climate_zone: "Continental",
        time_zone: "Central/Eastern",
        sales_tax_rate: 0.067,
        business_friendliness_score: 8.2,
    },
    ProfileSeed {
        code: "South",
        population: 18_000_000,
        gdp_per_capita: 48_000.0,
        market_potential: 0.78,
        avg_income: 54_000,
        unemployment_rate: 4.1,
        major_cities: ["Atlanta", "Miami", "Houston"],
        primary_industries: ["Energy", "Agriculture", "Tourism"],
        climate_zone: "Subtropical",
        time_zone: "Central/Eastern",
        sales_tax_rate: 0.074,
        business_friendliness_score: 7.8,
    },
    ProfileSeed {
        code: "East",
        population: 22_000_000,
        gdp_per_capita: 62_000.0,
        market_potential: 0.92,
        avg_income: 68_000,
        unemployment_rate: 2.8,
        major_cities: ["New York", "Boston", "Philadelphia"],
        primary_industries: ["Finance", "Technology", "Healthcare"],
        climate_zone: "Temperate",
        time_zone: "Eastern",
        sales_tax_rate: 0.082,
        business_friendliness_score: 8.7,
    },
    ProfileSeed {
        code: "West",
        population: 20_000_000,
        gdp_per_capita: 58_000.0,
        market_potential: 0.88,
        avg_income: 65_000,
        unemployment_rate: 3.5,
        major_cities: ["Los Angeles", "San Francisco", "Seattle"],
        primary_industries: ["Technology", "Entertainment", "Aerospace"],
        climate_zone: "Various",
        time_zone: "Pacific",
        sales_tax_rate: 0.089,
        business_friendliness_score: 8.4,
    },
    ProfileSeed {
        code: "Central",
        population: 12_000_000,
        gdp_per_capita: 52_000.0,
        market_potential: 0.75,
        avg_income: 58_000,
        unemployment_rate: 3.8,
        major_cities: ["Chicago", "Denver", "Kansas City"],
        primary_industries: ["Agriculture", "Manufacturing", "Logistics"],
        climate_zone: "Continental",
        time_zone: "Central/Mountain",
        sales_tax_rate: 0.069,
        business_friendliness_score: 7.9,
    },
];

/// Market profiles for the five broad regions used in the sales files.
pub fn region_profiles() -> Vec<RegionProfile> {
    PROFILE_SEEDS
        .iter()
        .map(|s| RegionProfile {
            region_code: s.code.to_string(),
            region_name: format!("{} Region", profile_adjective(s.code)),
            country: "USA".to_string(),
            state_province: format!("Various {} States", profile_adjective(s.code)),
            population: s.population,
            gdp_per_capita: s.gdp_per_capita,
            market_potential: s.market_potential,
            avg_income: s.avg_income,
            unemployment_rate: s.unemployment_rate,
            major_cities: s.major_cities.iter().map(|c| c.to_string()).collect(),
            primary_industries: s.primary_industries.iter().map(|i| i.to_string()).collect(),
            climate_zone: s.climate_zone.to_string(),
            time_zone: s.time_zone.to_string(),
            sales_tax_rate: s.sales_tax_rate,
            business_friendliness_score: s.business_friendliness_score,
        })
        .collect()
}

fn profile_adjective(code: &str) -> String {
    match code {
        "Central" => "Central".to_string(),
        other => format!("{other}ern"),
    }
}

fn list_column(values: impl Iterator<Item = Vec<String>>) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for list in values {
        for v in list {
            builder.values().append_value(v);
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

/// Encode profiles as Parquet, with list columns for cities and industries.
pub fn encode_region_profiles(profiles: &[RegionProfile]) -> Result<Bytes> {
    let list_of_utf8 = DataType::List(Arc::new(Field::new("item", DataType::Utf8, true)));
    let schema = Arc::new(Schema::new(vec![
        Field::new("region_code", DataType::Utf8, false),
        Field::new("region_name", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("state_province", DataType::Utf8, false),
        Field::new("population", DataType::Int64, false),
        Field::new("gdp_per_capita", DataType::Float64, false),
        Field::new("market_potential", DataType::Float64, false),
        Field::new("avg_income", DataType::Int64, false),
        Field::new("unemployment_rate", DataType::Float64, false),
        Field::new("major_cities", list_of_utf8.clone(), true),
        Field::new("primary_industries", list_of_utf8, true),
        Field::new("climate_zone", DataType::Utf8, false),
        Field::new("time_zone", DataType::Utf8, false),
        Field::new("sales_tax_rate", DataType::Float64, false),
        Field::new("business_friendliness_score", DataType::Float64, false),
    ]));

    let strings = |f: fn(&RegionProfile) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(profiles.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&RegionProfile) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(profiles.iter().map(f).collect::<Vec<_>>()))
    };
    let ints = |f: fn(&RegionProfile) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(profiles.iter().map(f).collect::<Vec<_>>()))
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|p| p.region_code.as_str()),
            strings(|p| p.region_name.as_str()),
            strings(|p| p.country.as_str()),
            strings(|p| p.state_province.as_str()),
            ints(|p| p.population),
            floats(|p| p.gdp_per_capita),
            floats(|p| p.market_potential),
            ints(|p| p.avg_income),
            floats(|p| p.unemployment_rate),
            list_column(profiles.iter().map(|p| p.major_cities.clone())),
            list_column(profiles.iter().map(|p| p.primary_industries.clone())),
            strings(|p| p.climate_zone.as_str()),
            strings(|p| p.time_zone.as_str()),
            floats(|p| p.sales_tax_rate),
            floats(|p| p.business_friendliness_score),
        ],
    )
    .map_err(|e| EtlError::Parquet {
        message: format!("record batch build failed: {e}"),
    })?;

    Ok(columnar::write_single_batch(schema, &batch)?)
}

/// Write [`region_profiles`] as Parquet.
pub fn write_region_profiles_parquet(path: impl AsRef<Path>) -> Result<GeneratedFile> {
    let path = path.as_ref();
    let profiles = region_profiles();
    let bytes = encode_region_profiles(&profiles)?;
    columnar::write_file(path, &bytes)?;
    Ok(GeneratedFile::new(path, bytes.len() as u64, profiles.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, ListArray};

    #[test]
    fn test_pipeline_regions() {
        let regions = pipeline_regions();
        assert_eq!(regions.len(), 10);
        assert_eq!(regions[0].region_id.as_str(), "NA_EAST");
        assert_eq!(regions[9].manager, "Ahmed Hassan");

        let total: f64 = regions.iter().map(|r| r.target_revenue.to_decimal()).sum();
        assert_eq!(total, 19_500_000.0);
    }

    #[test]
    fn test_region_profiles() {
        let profiles = region_profiles();
        let names: Vec<&str> = profiles.iter().map(|p| p.region_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Northern Region",
                "Southern Region",
                "Eastern Region",
                "Western Region",
                "Central Region"
            ]
        );
        assert_eq!(profiles[4].state_province, "Various Central States");
        assert_eq!(profiles[2].major_cities[0], "New York");
    }

    #[test]
    fn test_profiles_parquet_has_list_columns() {
        let bytes = encode_region_profiles(&region_profiles()).unwrap();
        let batches = columnar::read_batches(&bytes).unwrap();
        let batch = &batches[0];
        assert_eq!(batch.num_rows(), 5);
        assert_eq!(batch.num_columns(), 15);

        let idx = batch.schema().index_of("major_cities").unwrap();
        let cities = batch.column(idx).as_any().downcast_ref::<ListArray>().unwrap();
        assert_eq!(cities.value(0).len(), 3);
    }

    #[test]
    fn test_write_pipeline_regions_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.parquet");
        let file = write_pipeline_regions(&path).unwrap();
        assert_eq!(file.rows, 10);
        assert_eq!(loaders::read_regions_parquet(&path).unwrap(), pipeline_regions());
    }
}
