use super::{ARCHIVE_FILE, RAW_FILE, TRAIN_FILE, VALIDATE_FILE};
use crate::core::dataset::{read_records, write_records};
use crate::core::features::income_category;
use crate::core::fetch::{extract_member, HousingFetcher, ARCHIVE_MEMBER};
use crate::core::split::{stratified_split, train_test_split};
use crate::core::{HousingRecord, SplitStrategy, Stage, StageReport, Storage};
use crate::utils::error::Result;

/// 下載資料集並切分 train / validate
pub struct IngestStage<S: Storage> {
    storage: S,
    fetcher: HousingFetcher,
    test_ratio: f64,
    seed: u64,
    strategy: SplitStrategy,
}

impl<S: Storage> IngestStage<S> {
    pub fn new(
        storage: S,
        dataset_url: &str,
        test_ratio: f64,
        seed: u64,
        strategy: SplitStrategy,
    ) -> Self {
        Self {
            storage,
            fetcher: HousingFetcher::new(dataset_url),
            test_ratio,
            seed,
            strategy,
        }
    }

    pub fn split(&self, records: Vec<HousingRecord>) -> Result<(Vec<HousingRecord>, Vec<HousingRecord>)> {
        match self.strategy {
            SplitStrategy::Random => train_test_split(records, self.test_ratio, self.seed),
            SplitStrategy::Stratified => {
                stratified_split(records, self.test_ratio, self.seed, |record| {
                    income_category(record.median_income)
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Stage for IngestStage<S> {
    fn name(&self) -> &str {
        "ingest"
    }

    async fn run(&self) -> Result<StageReport> {
        tracing::info!("📥 Fetching housing data from: {}", self.fetcher.url());
        let archive = self.fetcher.fetch().await?;
        self.storage.write_file(ARCHIVE_FILE, &archive).await?;

        let raw = extract_member(&archive, ARCHIVE_MEMBER)?;
        self.storage.write_file(RAW_FILE, &raw).await?;

        let records = read_records(&raw)?;
        let total = records.len();
        tracing::info!("Loaded {} housing records", total);

        let (train, validate) = self.split(records)?;
        tracing::info!(
            "Split ({:?}): {} train / {} validate",
            self.strategy,
            train.len(),
            validate.len()
        );

        self.storage
            .write_file(TRAIN_FILE, &write_records(&train)?)
            .await?;
        self.storage
            .write_file(VALIDATE_FILE, &write_records(&validate)?)
            .await?;

        Ok(
            StageReport::new(self.name(), self.storage.location(TRAIN_FILE))
                .with_metric("rows", total as f64)
                .with_metric("train_rows", train.len() as f64)
                .with_metric("validate_rows", validate.len() as f64),
        )
    }
}
