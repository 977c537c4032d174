use crate::domain::model::{FeatureRow, CATEGORY_COLUMN, NUMERIC_ATTRIBUTES};
use crate::utils::error::{HousingError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// 缺值以各欄中位數補齊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedianImputer {
    pub statistics: Vec<f64>,
}

impl MedianImputer {
    pub fn fit(columns: &[Vec<Option<f64>>], names: &[&str]) -> Result<Self> {
        let statistics = columns
            .iter()
            .zip(names)
            .map(|(column, name)| {
                median(column).ok_or_else(|| {
                    HousingError::data(format!("column '{}' has no values to impute from", name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { statistics })
    }

    pub fn transform(&self, column_idx: usize, value: Option<f64>) -> f64 {
        value.unwrap_or(self.statistics[column_idx])
    }
}

pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Zero-mean, unit-variance scaling with the population standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(columns: &[Vec<f64>]) -> Self {
        let mut means = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());

        for column in columns {
            let n = column.len().max(1) as f64;
            let mean = column.iter().sum::<f64>() / n;
            let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();

            means.push(mean);
            // 常數欄不縮放
            scales.push(if std > 0.0 { std } else { 1.0 });
        }

        Self { means, scales }
    }

    pub fn transform(&self, column_idx: usize, value: f64) -> f64 {
        (value - self.means[column_idx]) / self.scales[column_idx]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub categories: Vec<String>,
}

impl OneHotEncoder {
    /// Categories are kept sorted, one indicator column each.
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut categories: Vec<String> = values.into_iter().map(str::to_string).collect();
        categories.sort();
        categories.dedup();
        Self { categories }
    }

    pub fn index_of(&self, value: &str) -> Result<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .map_err(|_| {
                HousingError::schema(CATEGORY_COLUMN, format!("unknown category '{}'", value))
            })
    }

    pub fn width(&self) -> usize {
        self.categories.len()
    }
}

pub struct FeaturePipeline;

impl FeaturePipeline {
    /// Fits imputer, scaler and encoder on `rows`.
    pub fn fit(rows: &[FeatureRow]) -> Result<FittedPipeline> {
        if rows.is_empty() {
            return Err(HousingError::data("cannot fit preprocessing on an empty dataset"));
        }

        let raw_columns: Vec<Vec<Option<f64>>> = (0..NUMERIC_ATTRIBUTES.len())
            .map(|idx| rows.iter().map(|row| row.numeric[idx]).collect())
            .collect();

        let imputer = MedianImputer::fit(&raw_columns, &NUMERIC_ATTRIBUTES)?;

        let imputed: Vec<Vec<f64>> = raw_columns
            .iter()
            .enumerate()
            .map(|(idx, column)| column.iter().map(|v| imputer.transform(idx, *v)).collect())
            .collect();
        let scaler = StandardScaler::fit(&imputed);

        let encoder = OneHotEncoder::fit(rows.iter().map(|row| row.category.as_str()));

        tracing::debug!(
            "Fitted preprocessing: {} numeric columns, categories {:?}",
            NUMERIC_ATTRIBUTES.len(),
            encoder.categories
        );

        Ok(FittedPipeline {
            numeric_attributes: NUMERIC_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
            imputer,
            scaler,
            encoder,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    pub numeric_attributes: Vec<String>,
    pub imputer: MedianImputer,
    pub scaler: StandardScaler,
    pub encoder: OneHotEncoder,
}

impl FittedPipeline {
    pub fn n_features(&self) -> usize {
        self.numeric_attributes.len() + self.encoder.width()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.numeric_attributes
            .iter()
            .cloned()
            .chain(
                self.encoder
                    .categories
                    .iter()
                    .map(|c| format!("{}_{}", CATEGORY_COLUMN, c)),
            )
            .collect()
    }

    /// 檢查反序列化後的參數彼此一致
    pub fn check_consistent(&self) -> Result<()> {
        if self.numeric_attributes.iter().map(String::as_str).ne(NUMERIC_ATTRIBUTES) {
            return Err(HousingError::model(format!(
                "pipeline numeric columns {:?} do not match {:?}",
                self.numeric_attributes, NUMERIC_ATTRIBUTES
            )));
        }

        let n_numeric = self.numeric_attributes.len();
        for (name, len) in [
            ("imputer statistics", self.imputer.statistics.len()),
            ("scaler means", self.scaler.means.len()),
            ("scaler scales", self.scaler.scales.len()),
        ] {
            if len != n_numeric {
                return Err(HousingError::model(format!(
                    "{} has {} entries, expected {}",
                    name, len, n_numeric
                )));
            }
        }

        if !self.encoder.categories.windows(2).all(|w| w[0] < w[1]) {
            return Err(HousingError::model(
                "encoder categories must be sorted and unique",
            ));
        }

        Ok(())
    }

    /// Numeric columns first (imputed, scaled), then the one-hot block.
    pub fn transform(&self, rows: &[FeatureRow]) -> Result<Array2<f64>> {
        self.check_consistent()?;
        let n_numeric = self.numeric_attributes.len();

        let mut matrix = Array2::<f64>::zeros((rows.len(), self.n_features()));

        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.numeric.iter().enumerate() {
                let imputed = self.imputer.transform(j, *value);
                matrix[[i, j]] = self.scaler.transform(j, imputed);
            }
            let category_idx = self.encoder.index_of(&row.category)?;
            matrix[[i, n_numeric + category_idx]] = 1.0;
        }

        Ok(matrix)
    }
}
