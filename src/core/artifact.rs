use crate::core::preprocess::FittedPipeline;
use crate::core::regression::LinearRegression;
use crate::domain::model::FeatureRow;
use crate::utils::error::{HousingError, Result};
use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;
pub const DEFAULT_MODEL_FILE: &str = "linear_model.json";

/// 訓練後保存的模型：前處理參數 + 線性模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub pipeline: FittedPipeline,
    pub model: LinearRegression,
    pub training_samples: usize,
    pub training_rmse: f64,
}

impl ModelArtifact {
    pub fn new(
        pipeline: FittedPipeline,
        model: LinearRegression,
        training_samples: usize,
        training_rmse: f64,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            trained_at: Utc::now(),
            pipeline,
            model,
            training_samples,
            training_rmse,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        let artifact: Self = serde_json::from_slice(data)?;

        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(HousingError::model(format!(
                "artifact format version {} is not supported (expected {})",
                artifact.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }
        if artifact.pipeline.n_features() != artifact.model.n_features() {
            return Err(HousingError::model(format!(
                "pipeline produces {} features but model expects {}",
                artifact.pipeline.n_features(),
                artifact.model.n_features()
            )));
        }
        artifact.pipeline.check_consistent()?;

        Ok(artifact)
    }

    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Array1<f64>> {
        let features = self.pipeline.transform(rows)?;
        self.model.predict(features.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preprocess::FeaturePipeline;

    fn sample_rows() -> Vec<FeatureRow> {
        (0..6)
            .map(|i| {
                let mut numeric = [Some(1.0); 11];
                numeric[7] = Some(i as f64);
                FeatureRow {
                    numeric,
                    category: if i % 2 == 0 { "INLAND" } else { "NEAR BAY" }.to_string(),
                    label: 1000.0 * i as f64,
                    income_cat: None,
                }
            })
            .collect()
    }

    fn sample_artifact() -> ModelArtifact {
        let rows = sample_rows();
        let pipeline = FeaturePipeline::fit(&rows).unwrap();
        let x = pipeline.transform(&rows).unwrap();
        let y: Array1<f64> = rows.iter().map(|r| r.label).collect();
        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        ModelArtifact::new(pipeline, model, rows.len(), 0.0)
    }

    #[test]
    fn test_json_round_trip_keeps_predictions() {
        let artifact = sample_artifact();
        let restored = ModelArtifact::from_json(&artifact.to_json().unwrap()).unwrap();

        assert_eq!(restored.trained_at, artifact.trained_at);
        assert_eq!(restored.pipeline.encoder, artifact.pipeline.encoder);
        assert_eq!(restored.training_samples, 6);

        let predictions = restored.predict(&sample_rows()).unwrap();
        assert!((predictions[5] - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_unknown_format_version() {
        let mut artifact = sample_artifact();
        artifact.format_version = 99;
        let bytes = serde_json::to_vec(&artifact).unwrap();

        assert!(matches!(
            ModelArtifact::from_json(&bytes),
            Err(HousingError::ModelError { .. })
        ));
    }

    #[test]
    fn test_rejects_truncated_imputer_statistics() {
        let mut artifact = sample_artifact();
        artifact.pipeline.imputer.statistics.truncate(3);
        let bytes = artifact.to_json().unwrap();

        assert!(matches!(
            ModelArtifact::from_json(&bytes),
            Err(HousingError::ModelError { .. })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            ModelArtifact::from_json(b"not json"),
            Err(HousingError::SerializationError(_))
        ));
    }
}
