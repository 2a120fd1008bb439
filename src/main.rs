use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use sales_normalizer::app::etl_use_case::{EtlUseCase, LoadPlan};
use sales_normalizer::app::ports::ExtractorPort;
use sales_normalizer::config::{ConfigOverrides, PipelineConfig};
use sales_normalizer::infra::{FileExtractor, FsObjectLoader, HttpCsvExtractor};
use sales_normalizer::logging;
use sales_normalizer::pipeline::{DefaultNormalizer, Normalizer};

#[derive(Parser)]
#[command(name = "sales_normalizer")]
#[command(about = "Clean raw sales transactions and split them into customers, stores, products and sales")]
#[command(version = "0.1.0")]
struct Cli {
    /// Directory for rolling JSON log files
    #[arg(long, default_value = "logs", global = true)]
    log_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, normalize and upload all tables
    Run {
        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output bucket (overrides config file and environment)
        #[arg(long)]
        bucket: Option<String>,
        /// Also upload the raw table before the normalized ones
        #[arg(long)]
        upload_raw: bool,
        /// Directory acting as the object store root
        #[arg(long)]
        storage_root: Option<PathBuf>,
        /// Read the raw table from a local CSV instead of the HTTP source
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Normalize a local CSV and write the four tables to a directory
    Normalize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run {
            config,
            bucket,
            upload_raw,
            storage_root,
            input,
        } => {
            // Configuration problems are fatal before anything is extracted
            let cfg = PipelineConfig::load(
                config.as_deref(),
                ConfigOverrides {
                    bucket,
                    upload_raw,
                    storage_root,
                },
            )?;
            info!(bucket = %cfg.bucket, prefix = %cfg.output_prefix, "Starting pipeline");

            let extractor: Box<dyn ExtractorPort> = match input {
                Some(path) => Box::new(FileExtractor::new(path)),
                None => Box::new(HttpCsvExtractor::from_env(&cfg.source)),
            };
            let loader = Box::new(FsObjectLoader::new(cfg.storage_root.clone()));
            let use_case =
                EtlUseCase::with_default_normalizer(extractor, loader, LoadPlan::from(&cfg));

            let summary = use_case.run().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Normalize { input, output_dir } => {
            let raw = FileExtractor::new(input).extract().await?;
            let tables = DefaultNormalizer::default().normalize(raw)?;

            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("creating {}", output_dir.display()))?;
            for (name, body) in tables.to_csv_tables()? {
                let path = output_dir.join(format!("{}.csv", name));
                std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&tables.report)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::init_logging(&cli.log_dir);

    if let Err(e) = run(cli.command).await {
        error!("Pipeline failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
