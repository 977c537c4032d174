use clap::Parser;
use housing_price::core::ConfigProvider;
use housing_price::utils::{logger, validation::Validate};
use housing_price::{build_workflow, CliConfig, HousingError, WorkflowConfig, WorkflowEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting housing-price workflow");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            run_from_file(path, cli.monitor).await
        }
        None => run(&cli, cli.monitor).await,
    };

    if let Err(e) = result {
        e.report();

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run_from_file(path: &str, monitor: bool) -> Result<(), HousingError> {
    let config = WorkflowConfig::from_file(path)?;
    run(&config, monitor || config.monitoring_enabled()).await
}

async fn run<C: ConfigProvider + Validate>(config: &C, monitor: bool) -> Result<(), HousingError> {
    config.validate()?;

    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = WorkflowEngine::new_with_monitoring(build_workflow(config), monitor);
    let reports = engine.run().await?;

    println!("✅ Workflow completed successfully!");
    for report in &reports {
        println!("📁 {}: {}", report.stage, report.output_path);
    }
    if let Some(rmse) = reports.last().and_then(|report| report.metric("rmse")) {
        println!("📉 Validation RMSE: {:.4}", rmse);
    }

    Ok(())
}
