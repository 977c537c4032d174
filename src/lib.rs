pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use app::build_workflow;
pub use app::stages::{IngestStage, ScoreStage, TrainStage};
pub use config::toml_config::WorkflowConfig;
pub use core::{artifact::ModelArtifact, engine::WorkflowEngine};
pub use utils::error::{HousingError, Result};
