use super::TRAIN_FILE;
use crate::core::artifact::ModelArtifact;
use crate::core::dataset::read_records;
use crate::core::features::engineer_all;
use crate::core::metrics::root_mean_squared_error;
use crate::core::preprocess::FeaturePipeline;
use crate::core::regression::LinearRegression;
use crate::core::{HousingRecord, Stage, StageReport, Storage};
use crate::utils::error::Result;
use ndarray::Array1;

/// Fits preprocessing and the linear model on `records`.
pub fn train_model(records: &[HousingRecord]) -> Result<ModelArtifact> {
    let rows = engineer_all(records);
    let pipeline = FeaturePipeline::fit(&rows)?;
    let features = pipeline.transform(&rows)?;
    let labels: Array1<f64> = rows.iter().map(|row| row.label).collect();

    let model = LinearRegression::fit(features.view(), labels.view())?;
    let predictions = model.predict(features.view())?;
    let training_rmse = root_mean_squared_error(&labels.to_vec(), &predictions.to_vec())?;

    tracing::debug!("Model features: {:?}", pipeline.feature_names());
    Ok(ModelArtifact::new(pipeline, model, rows.len(), training_rmse))
}

pub struct TrainStage<S: Storage> {
    data: S,
    models: S,
    model_file: String,
}

impl<S: Storage> TrainStage<S> {
    pub fn new(data: S, models: S, model_file: &str) -> Self {
        Self {
            data,
            models,
            model_file: model_file.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Stage for TrainStage<S> {
    fn name(&self) -> &str {
        "train"
    }

    async fn run(&self) -> Result<StageReport> {
        tracing::info!("🏋️ Training on: {}", self.data.location(TRAIN_FILE));
        let records = read_records(&self.data.read_file(TRAIN_FILE).await?)?;

        let artifact = train_model(&records)?;
        tracing::info!(
            "Trained on {} rows, training RMSE {:.2}",
            artifact.training_samples,
            artifact.training_rmse
        );

        self.models
            .write_file(&self.model_file, &artifact.to_json()?)
            .await?;

        Ok(
            StageReport::new(self.name(), self.models.location(&self.model_file))
                .with_metric("rows", artifact.training_samples as f64)
                .with_metric("features", artifact.model.n_features() as f64)
                .with_metric("rank", artifact.model.rank as f64)
                .with_metric("train_rmse", artifact.training_rmse),
        )
    }
}
