use clap::Parser;
use housing_price::core::artifact::DEFAULT_MODEL_FILE;
use housing_price::utils::logger;
use housing_price::utils::validation::{validate_file_name, validate_path};
use housing_price::{HousingError, LocalStorage, TrainStage, WorkflowEngine};

#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Fit the linear regression model on datasets/housing/train.csv")]
struct Args {
    /// Root directory containing datasets/housing/train.csv
    #[arg(long, alias = "read_train_file", default_value = ".")]
    read_train_file: String,

    /// Directory that receives the model artifact
    #[arg(long, alias = "output_model_path", default_value = ".")]
    output_model_path: String,

    #[arg(long, default_value = DEFAULT_MODEL_FILE)]
    model_file: String,

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
    validate_path("read_train_file", &args.read_train_file)?;
    validate_path("output_model_path", &args.output_model_path)?;
    validate_file_name("model_file", &args.model_file)?;

    let stage = TrainStage::new(
        LocalStorage::new(&args.read_train_file),
        LocalStorage::new(&args.output_model_path),
        &args.model_file,
    );

    let reports = WorkflowEngine::new(vec![Box::new(stage)]).run().await?;
    for report in reports {
        println!("✅ Model saved to: {}", report.output_path);
    }
    Ok(())
}
