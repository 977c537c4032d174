use crate::domain::model::StageReport;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn location(&self, path: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    #[default]
    Random,
    /// 依 income_cat 分層抽樣
    Stratified,
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_url(&self) -> &str;
    fn data_root(&self) -> &str;
    fn model_dir(&self) -> &str;
    fn model_file(&self) -> &str;
    fn test_ratio(&self) -> f64;
    fn seed(&self) -> u64;
    fn split_strategy(&self) -> SplitStrategy;
}

#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> Result<StageReport>;
}
