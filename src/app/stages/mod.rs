pub mod ingest;
pub mod score;
pub mod train;

pub use ingest::IngestStage;
pub use score::{evaluate, Evaluation, ScoreStage};
pub use train::{train_model, TrainStage};

/// ingest 輸出與 train/score 輸入的相對路徑
pub const ARCHIVE_FILE: &str = "datasets/housing/housing.tgz";
pub const RAW_FILE: &str = "datasets/housing/housing.csv";
pub const TRAIN_FILE: &str = "datasets/housing/train.csv";
pub const VALIDATE_FILE: &str = "datasets/housing/validate.csv";
