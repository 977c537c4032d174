use crate::core::artifact::DEFAULT_MODEL_FILE;
use crate::core::fetch::DEFAULT_DATASET_URL;
use crate::core::{ConfigProvider, SplitStrategy};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use super::validate_provider;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "housing")]
#[command(about = "Housing price regression: ingest, train and score in one run")]
pub struct CliConfig {
    /// TOML configuration file; replaces the dataset/split/model flags below
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub dataset_url: String,

    /// Root directory that receives datasets/housing/
    #[arg(long, default_value = ".")]
    pub data_root: String,

    #[arg(long, default_value = ".")]
    pub model_dir: String,

    #[arg(long, default_value = DEFAULT_MODEL_FILE)]
    pub model_file: String,

    #[arg(long, default_value = "0.2")]
    pub test_ratio: f64,

    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Stratify the split on the income category
    #[arg(long)]
    pub stratify: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each stage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn dataset_url(&self) -> &str {
        &self.dataset_url
    }

    fn data_root(&self) -> &str {
        &self.data_root
    }

    fn model_dir(&self) -> &str {
        &self.model_dir
    }

    fn model_file(&self) -> &str {
        &self.model_file
    }

    fn test_ratio(&self) -> f64 {
        self.test_ratio
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn split_strategy(&self) -> SplitStrategy {
        if self.stratify {
            SplitStrategy::Stratified
        } else {
            SplitStrategy::Random
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["housing"]);

        assert_eq!(config.dataset_url, DEFAULT_DATASET_URL);
        assert_eq!(config.model_file, "linear_model.json");
        assert_eq!(config.test_ratio, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.split_strategy(), SplitStrategy::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_and_validation() {
        let config = CliConfig::parse_from([
            "housing",
            "--data-root",
            "/tmp/data",
            "--test-ratio",
            "1.5",
            "--stratify",
        ]);

        assert_eq!(config.data_root(), "/tmp/data");
        assert_eq!(config.split_strategy(), SplitStrategy::Stratified);
        assert!(config.validate().is_err());
    }
}
