// Application layer: the ingest, train and score stages wired to local storage.

pub mod stages;

use crate::adapters::LocalStorage;
use crate::core::{ConfigProvider, Stage};
use stages::{IngestStage, ScoreStage, TrainStage};

/// 依設定建立完整流程：ingest → train → score
pub fn build_workflow(config: &impl ConfigProvider) -> Vec<Box<dyn Stage>> {
    let data = LocalStorage::new(config.data_root());
    let models = LocalStorage::new(config.model_dir());

    vec![
        Box::new(IngestStage::new(
            data.clone(),
            config.dataset_url(),
            config.test_ratio(),
            config.seed(),
            config.split_strategy(),
        )),
        Box::new(TrainStage::new(data.clone(), models.clone(), config.model_file())),
        Box::new(ScoreStage::new(data, models, config.model_file())),
    ]
}
