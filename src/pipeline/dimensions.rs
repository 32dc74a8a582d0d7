use crate::common::constants::{
    DIM_CAMPAIGN_TABLE, DIM_CUSTOMER_TABLE, DIM_PRODUCT_TABLE, FACT_SALES_TABLE,
    STAGING_SALES_TABLE,
};
use crate::common::error::Result;
use crate::frame::DataFrame;
use crate::schema::{
    self, DIM_CAMPAIGN_COLUMNS, DIM_CUSTOMER_COLUMNS, DIM_PRODUCT_COLUMNS, FACT_SALES_COLUMNS,
};
use crate::storage::TableStore;
use std::sync::Arc;
use tracing::info;

/// Row counts written to each analytical table.
#[derive(Debug, Clone, Default)]
pub struct DimensionLoadResult {
    pub product_rows: usize,
    pub customer_rows: usize,
    pub campaign_rows: usize,
    pub fact_rows: usize,
}

/// Projects the staging table into the star schema: three deduplicated
/// dimensions and one fact table that keeps row multiplicity.
///
/// The four writes are sequential and independent. A projection that fails
/// (say a missing staging column) aborts the run but does not roll back
/// tables already written before it.
pub struct Dimensionalizer {
    store: Arc<dyn TableStore>,
}

impl Dimensionalizer {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn run(&self) -> Result<DimensionLoadResult> {
        let staging = self.store.read_table(STAGING_SALES_TABLE).await?;

        let product_rows = self
            .write_projection(&staging, DIM_PRODUCT_TABLE, &DIM_PRODUCT_COLUMNS, true)
            .await?;
        let customer_rows = self
            .write_projection(&staging, DIM_CUSTOMER_TABLE, &DIM_CUSTOMER_COLUMNS, true)
            .await?;
        let campaign_rows = self
            .write_projection(&staging, DIM_CAMPAIGN_TABLE, &DIM_CAMPAIGN_COLUMNS, true)
            .await?;
        let fact_rows = self
            .write_projection(&staging, FACT_SALES_TABLE, &FACT_SALES_COLUMNS, false)
            .await?;

        Ok(DimensionLoadResult {
            product_rows,
            customer_rows,
            campaign_rows,
            fact_rows,
        })
    }

    async fn write_projection(
        &self,
        staging: &DataFrame,
        table: &str,
        columns: &[&str],
        deduplicate: bool,
    ) -> Result<usize> {
        // Boundary check so a schema mismatch surfaces before the write
        schema::require_columns(staging, STAGING_SALES_TABLE, columns)?;

        let mut frame = staging.select(columns)?;
        if deduplicate {
            frame = frame.drop_duplicates();
        }
        let row_count = frame.num_rows();

        self.store.overwrite_table(table, frame).await?;
        info!("Loaded {} rows into {}", row_count, table);
        Ok(row_count)
    }
}
