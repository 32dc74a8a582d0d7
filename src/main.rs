use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

mod common;
mod config;
mod frame;
mod logging;
mod parser;
mod pipeline;
mod sample;
mod schema;
mod storage;

use crate::common::constants::RAW_SALES_TABLE;
use crate::config::Config;
use crate::pipeline::{Dimensionalizer, EtlPipeline, Normalizer, Truncator};
use crate::storage::{JsonFileStore, TableStore};

#[derive(Parser)]
#[command(name = "sales_etl")]
#[command(about = "Batch ETL pipeline for layered sales tables")]
#[command(version = "0.1.0")]
struct Cli {
    /// Warehouse directory (overrides config.toml)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: truncate, load staging, load analytical tables
    Run,
    /// Truncate the staging and analytical tables only
    Truncate,
    /// Load the raw table into staging only
    Normalize,
    /// Load staging into the analytical tables only
    Dimensions,
    /// Create a sample raw table and empty target tables
    Seed,
}

fn build_store(cli_data_dir: Option<PathBuf>) -> Result<Arc<dyn TableStore>, Box<dyn std::error::Error>> {
    let data_dir = match cli_data_dir {
        Some(dir) => dir,
        None => Config::load_or_default()?.warehouse.data_dir,
    };
    info!("Using warehouse directory {}", data_dir.display());
    Ok(Arc::new(JsonFileStore::new(data_dir)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let store = build_store(cli.data_dir)?;

    match cli.command {
        Commands::Run => {
            println!("🚀 Running full ETL pipeline...");
            match EtlPipeline::new(store).run().await {
                Ok(summary) => {
                    println!("\n📊 Run {} summary:", summary.run_id);
                    println!("   Started: {}", summary.started_at.to_rfc3339());
                    println!("   Staging rows: {}", summary.staging_rows);
                    println!("   Product dimension rows: {}", summary.dimensions.product_rows);
                    println!("   Customer dimension rows: {}", summary.dimensions.customer_rows);
                    println!("   Campaign dimension rows: {}", summary.dimensions.campaign_rows);
                    println!("   Fact rows: {}", summary.dimensions.fact_rows);
                    println!("   Elapsed: {:.2}s", summary.elapsed_secs);
                }
                Err(e) => {
                    error!("ETL run failed: {}", e);
                    println!("❌ ETL run failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Truncate => {
            println!("🔄 Truncating staging and analytical tables...");
            Truncator::new(store).run().await?;
            println!("✅ Tables truncated successfully!");
        }
        Commands::Normalize => {
            println!("📥 Loading raw → staging...");
            let rows = Normalizer::new(store).run().await?;
            println!("✅ Staging table loaded successfully! ({rows} rows)");
        }
        Commands::Dimensions => {
            println!("📊 Loading staging → analytical tables...");
            let result = Dimensionalizer::new(store).run().await?;
            println!(
                "✅ Analytical tables loaded! (product: {}, customer: {}, campaign: {}, fact: {})",
                result.product_rows, result.customer_rows, result.campaign_rows, result.fact_rows
            );
        }
        Commands::Seed => {
            println!("🌱 Seeding sample warehouse...");
            let raw = sample::sample_raw_frame();
            let raw_rows = raw.num_rows();
            store.overwrite_table(RAW_SALES_TABLE, raw).await?;
            for (table, frame) in sample::empty_target_frames() {
                store.overwrite_table(table, frame).await?;
            }
            println!("✅ Seeded {RAW_SALES_TABLE} with {raw_rows} rows and created empty target tables");
        }
    }
    Ok(())
}
