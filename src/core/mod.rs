pub mod artifact;
pub mod dataset;
pub mod engine;
pub mod features;
pub mod fetch;
pub mod metrics;
pub mod preprocess;
pub mod regression;
pub mod split;

pub use crate::domain::model::{FeatureRow, HousingRecord, StageReport};
pub use crate::domain::ports::{ConfigProvider, SplitStrategy, Stage, Storage};
pub use crate::utils::error::Result;
