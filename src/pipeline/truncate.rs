use crate::common::constants::{ANALYTICAL_TABLES, STAGING_SALES_TABLE};
use crate::common::error::Result;
use crate::storage::TableStore;
use std::sync::Arc;
use tracing::info;

/// Empties the staging table and every analytical table ahead of a reload.
/// Each table keeps its current schema; only the rows go. This is what makes
/// a run a full refresh: nothing from the previous run can survive into the
/// reload.
pub struct Truncator {
    store: Arc<dyn TableStore>,
}

impl Truncator {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Truncates staging first, then the analytical tables in load order.
    /// A missing table aborts the run here, before anything is written.
    pub async fn run(&self) -> Result<()> {
        self.truncate_table(STAGING_SALES_TABLE).await?;
        for table in ANALYTICAL_TABLES {
            self.truncate_table(table).await?;
        }
        Ok(())
    }

    async fn truncate_table(&self, table: &str) -> Result<()> {
        let existing = self.store.read_table(table).await?;
        self.store.overwrite_table(table, existing.limit(0)).await?;
        info!("Truncated table {}", table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::EtlError;
    use crate::storage::InMemoryStore;
    use crate::frame::DataFrame;
    use serde_json::json;

    async fn seeded_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let mut frame = DataFrame::empty(vec!["CustomerID"]);
        frame.push_row(vec![json!("C1")]).unwrap();
        for table in std::iter::once(STAGING_SALES_TABLE).chain(ANALYTICAL_TABLES) {
            store.overwrite_table(table, frame.clone()).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn empties_every_target_but_keeps_schema() {
        let store = seeded_store().await;
        let truncator = Truncator::new(store.clone());
        truncator.run().await.unwrap();

        for table in std::iter::once(STAGING_SALES_TABLE).chain(ANALYTICAL_TABLES) {
            let frame = store.read_table(table).await.unwrap();
            assert_eq!(frame.num_rows(), 0, "{table} should be empty");
            assert_eq!(frame.columns(), &["CustomerID"]);
        }
    }

    #[tokio::test]
    async fn truncation_is_idempotent() {
        let store = seeded_store().await;
        let truncator = Truncator::new(store.clone());
        truncator.run().await.unwrap();
        truncator.run().await.unwrap();

        let frame = store.read_table(STAGING_SALES_TABLE).await.unwrap();
        assert_eq!(frame.num_rows(), 0);
        assert_eq!(frame.columns(), &["CustomerID"]);
    }

    #[tokio::test]
    async fn missing_table_aborts() {
        let store = Arc::new(InMemoryStore::new());
        let truncator = Truncator::new(store);
        let err = truncator.run().await.unwrap_err();
        assert!(matches!(err, EtlError::TableNotFound(_)));
    }
}
