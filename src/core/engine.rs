use crate::core::{Stage, StageReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

pub struct WorkflowEngine {
    stages: Vec<Box<dyn Stage>>,
    monitor: SystemMonitor,
}

impl WorkflowEngine {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self::new_with_monitoring(stages, false)
    }

    pub fn new_with_monitoring(stages: Vec<Box<dyn Stage>>, monitor_enabled: bool) -> Self {
        Self {
            stages,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// 依序執行各階段，遇到第一個錯誤即停止
    pub async fn run(&self) -> Result<Vec<StageReport>> {
        tracing::info!("Starting workflow: {}", self.stage_names().join(" → "));

        let mut reports = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            let started = Instant::now();
            tracing::info!("▶️  Running stage '{}'", stage.name());

            let report = stage.run().await.inspect_err(|e| {
                tracing::error!("Stage '{}' failed: {}", stage.name(), e);
            })?;

            tracing::info!(
                "✅ Stage '{}' finished in {:?} → {}",
                stage.name(),
                started.elapsed(),
                report.output_path
            );
            for (name, value) in &report.metrics {
                tracing::info!("   {} = {}", name, value);
            }
            self.monitor.log_stats(stage.name());

            reports.push(report);
        }

        self.monitor.log_final_stats();
        Ok(reports)
    }
}
