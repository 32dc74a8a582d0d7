use crate::common::error::Result;
use crate::pipeline::{DimensionLoadResult, Dimensionalizer, Normalizer, Truncator};
use crate::storage::TableStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Outcome of one full pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub staging_rows: usize,
    pub dimensions: DimensionLoadResult,
    pub elapsed_secs: f64,
}

/// Driver for the full refresh: truncate → normalize → dimensionalize, in
/// that order, no branching, no retries. A failing stage aborts the run
/// wherever it is; nothing written so far is undone.
pub struct EtlPipeline {
    store: Arc<dyn TableStore>,
}

impl EtlPipeline {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let span = tracing::info_span!("etl_run", run_id = %run_id);
        let _enter = span.enter();
        let started = Instant::now();

        println!("🔄 Truncating staging and analytical tables...");
        Truncator::new(self.store.clone()).run().await?;
        println!("✅ Tables truncated successfully!");

        println!("📥 Loading raw → staging...");
        let staging_rows = Normalizer::new(self.store.clone()).run().await?;
        println!("✅ Staging table loaded successfully! ({staging_rows} rows)");

        println!("📊 Loading staging → analytical tables...");
        let dimensions = Dimensionalizer::new(self.store.clone()).run().await?;
        println!("✅ Analytical tables loaded successfully!");

        let elapsed_secs = started.elapsed().as_secs_f64();
        info!(
            staging_rows,
            fact_rows = dimensions.fact_rows,
            elapsed_secs,
            "ETL run complete"
        );
        println!("🏁 ETL pipeline completed!");

        Ok(RunSummary {
            run_id,
            started_at,
            staging_rows,
            dimensions,
            elapsed_secs,
        })
    }
}
