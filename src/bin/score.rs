use clap::Parser;
use housing_price::core::artifact::DEFAULT_MODEL_FILE;
use housing_price::utils::logger;
use housing_price::utils::validation::{validate_file_name, validate_path};
use housing_price::{HousingError, LocalStorage, ScoreStage, WorkflowEngine};
use std::path::Path;

#[derive(Parser)]
#[command(name = "score")]
#[command(about = "Score a saved model against datasets/housing/validate.csv")]
struct Args {
    /// Root directory containing datasets/housing/validate.csv
    #[arg(long, alias = "read_validate_file", default_value = ".")]
    read_validate_file: String,

    /// Path to the model artifact written by `train`
    #[arg(long, alias = "read_model_path", default_value = DEFAULT_MODEL_FILE)]
    read_model_path: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(&args).await {
        e.report();
        std::process::exit(e.exit_code().max(1));
    }

    Ok(())
}

async fn run(args: &Args) -> Result<(), HousingError> {
    validate_path("read_validate_file", &args.read_validate_file)?;
    validate_path("read_model_path", &args.read_model_path)?;

    // 模型路徑拆成目錄與檔名
    let model_path = Path::new(&args.read_model_path);
    let model_dir = model_path.parent().unwrap_or_else(|| Path::new("."));
    let model_file = model_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    validate_file_name("read_model_path", model_file)?;

    let stage = ScoreStage::new(
        LocalStorage::new(&args.read_validate_file),
        LocalStorage::new(model_dir),
        model_file,
    );

    let reports = WorkflowEngine::new(vec![Box::new(stage)]).run().await?;
    for report in reports {
        if let Some(rmse) = report.metric("rmse") {
            println!("📉 RMSE: {:.4}", rmse);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_underscore_flags() {
        let args = Args::parse_from([
            "score",
            "--read_validate_file",
            "data",
            "--read_model_path",
            "models/linear_model.json",
        ]);
        assert_eq!(args.read_validate_file, "data");
        assert_eq!(args.read_model_path, "models/linear_model.json");

        let args = Args::parse_from(["score", "--read-validate-file", "other"]);
        assert_eq!(args.read_validate_file, "other");
    }
}
