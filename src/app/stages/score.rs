use super::VALIDATE_FILE;
use crate::core::artifact::ModelArtifact;
use crate::core::dataset::read_records;
use crate::core::features::engineer_all;
use crate::core::metrics::{mean_absolute_error, r2_score, root_mean_squared_error};
use crate::core::{HousingRecord, Stage, StageReport, Storage};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub rows: usize,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

/// 以已保存的前處理參數轉換資料後評分
pub fn evaluate(artifact: &ModelArtifact, records: &[HousingRecord]) -> Result<Evaluation> {
    let rows = engineer_all(records);
    let labels: Vec<f64> = rows.iter().map(|row| row.label).collect();
    let predictions = artifact.predict(&rows)?.to_vec();

    Ok(Evaluation {
        rows: rows.len(),
        rmse: root_mean_squared_error(&labels, &predictions)?,
        mae: mean_absolute_error(&labels, &predictions)?,
        r2: r2_score(&labels, &predictions)?,
    })
}

pub struct ScoreStage<S: Storage> {
    data: S,
    models: S,
    model_file: String,
}

impl<S: Storage> ScoreStage<S> {
    pub fn new(data: S, models: S, model_file: &str) -> Self {
        Self {
            data,
            models,
            model_file: model_file.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Stage for ScoreStage<S> {
    fn name(&self) -> &str {
        "score"
    }

    async fn run(&self) -> Result<StageReport> {
        tracing::info!("📦 Loading model: {}", self.models.location(&self.model_file));
        let artifact = ModelArtifact::from_json(&self.models.read_file(&self.model_file).await?)?;
        tracing::debug!("Model trained at {}", artifact.trained_at);

        let records = read_records(&self.data.read_file(VALIDATE_FILE).await?)?;
        let evaluation = evaluate(&artifact, &records)?;
        tracing::info!(
            "Validation RMSE {:.2} over {} rows",
            evaluation.rmse,
            evaluation.rows
        );

        Ok(
            StageReport::new(self.name(), self.data.location(VALIDATE_FILE))
                .with_metric("rows", evaluation.rows as f64)
                .with_metric("rmse", evaluation.rmse)
                .with_metric("mae", evaluation.mae)
                .with_metric("r2", evaluation.r2),
        )
    }
}
