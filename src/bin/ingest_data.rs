use clap::Parser;
use housing_price::core::fetch::DEFAULT_DATASET_URL;
use housing_price::core::SplitStrategy;
use housing_price::utils::logger;
use housing_price::utils::validation::{validate_open_range, validate_path, validate_url};
use housing_price::{HousingError, IngestStage, LocalStorage, WorkflowEngine};

#[derive(Parser)]
#[command(name = "ingest_data")]
#[command(about = "Download the housing dataset and split it into train/validate CSV files")]
struct Args {
    /// Directory that receives datasets/housing/
    #[arg(long, alias = "DOWNLOAD_ROOT", default_value = ".")]
    download_root: String,

    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    dataset_url: String,

    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    #[arg(long, default_value = "42")]
    seed: u64,

    /// Stratify the split on the income category
    #[arg(long)]
    stratify: bool,

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
    validate_path("download_root", &args.download_root)?;
    validate_url("dataset_url", &args.dataset_url)?;
    validate_open_range("test_ratio", args.test_ratio, 0.0, 1.0)?;

    let strategy = if args.stratify {
        SplitStrategy::Stratified
    } else {
        SplitStrategy::Random
    };
    let stage = IngestStage::new(
        LocalStorage::new(&args.download_root),
        &args.dataset_url,
        args.test_ratio,
        args.seed,
        strategy,
    );

    let reports = WorkflowEngine::new(vec![Box::new(stage)]).run().await?;
    for report in reports {
        println!("✅ Train/validate files written next to: {}", report.output_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_original_download_root_flag() {
        let args = Args::parse_from(["ingest_data", "--DOWNLOAD_ROOT", "data"]);
        assert_eq!(args.download_root, "data");
        assert!(!args.stratify);
    }
}
