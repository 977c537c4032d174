use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// housing.csv 的欄位順序
pub const CSV_COLUMNS: [&str; 10] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "median_house_value",
    "ocean_proximity",
];

pub const CATEGORY_COLUMN: &str = "ocean_proximity";

/// 模型使用的數值欄位 (原始 8 欄 + 衍生 3 欄)
pub const NUMERIC_ATTRIBUTES: [&str; 11] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "rooms_per_household",
    "bedrooms_per_room",
    "population_per_household",
];

/// One row of the housing dataset. Empty numeric fields deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingRecord {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub housing_median_age: Option<f64>,
    pub total_rooms: Option<f64>,
    pub total_bedrooms: Option<f64>,
    pub population: Option<f64>,
    pub households: Option<f64>,
    pub median_income: Option<f64>,
    pub median_house_value: f64,
    pub ocean_proximity: String,
}

/// A record after feature engineering, ready for the preprocessing pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Values in [`NUMERIC_ATTRIBUTES`] order.
    pub numeric: [Option<f64>; 11],
    pub category: String,
    pub label: f64,
    pub income_cat: Option<u8>,
}

impl FeatureRow {
    pub fn value(&self, attribute: &str) -> Option<f64> {
        NUMERIC_ATTRIBUTES
            .iter()
            .position(|name| *name == attribute)
            .and_then(|idx| self.numeric[idx])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: String,
    pub output_path: String,
    pub metrics: BTreeMap<String, f64>,
}

impl StageReport {
    pub fn new(stage: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            output_path: output_path.into(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}
