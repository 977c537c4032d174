#[cfg(feature = "cli")]
pub mod args;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_name, validate_open_range, validate_path, validate_url};

#[cfg(feature = "cli")]
pub use args::CliConfig;

/// 所有設定來源共用的檢查
pub fn validate_provider(config: &impl ConfigProvider) -> Result<()> {
    validate_url("dataset_url", config.dataset_url())?;
    validate_path("data_root", config.data_root())?;
    validate_path("model_dir", config.model_dir())?;
    validate_file_name("model_file", config.model_file())?;
    validate_open_range("test_ratio", config.test_ratio(), 0.0, 1.0)?;
    Ok(())
}
