use crate::config::validate_provider;
use crate::core::artifact::DEFAULT_MODEL_FILE;
use crate::core::fetch::DEFAULT_DATASET_URL;
use crate::core::{ConfigProvider, SplitStrategy};
use crate::utils::error::{HousingError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub workflow: WorkflowSection,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub model: ModelConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSection {
    pub name: String,
    pub description: Option<String>,
}

impl Default for WorkflowSection {
    fn default() -> Self {
        Self {
            name: "housing".to_string(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub url: String,
    pub root: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            root: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    pub test_ratio: f64,
    pub seed: u64,
    #[serde(default)]
    pub strategy: SplitStrategy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
            strategy: SplitStrategy::Random,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub dir: String,
    pub file: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            file: DEFAULT_MODEL_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl WorkflowConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HousingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HousingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_ROOT})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for WorkflowConfig {
    fn dataset_url(&self) -> &str {
        &self.dataset.url
    }

    fn data_root(&self) -> &str {
        &self.dataset.root
    }

    fn model_dir(&self) -> &str {
        &self.model.dir
    }

    fn model_file(&self) -> &str {
        &self.model.file
    }

    fn test_ratio(&self) -> f64 {
        self.split.test_ratio
    }

    fn seed(&self) -> u64 {
        self.split.seed
    }

    fn split_strategy(&self) -> SplitStrategy {
        self.split.strategy
    }
}

impl Validate for WorkflowConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("workflow.name", &self.workflow.name)?;
        validate_provider(self)
    }
}
