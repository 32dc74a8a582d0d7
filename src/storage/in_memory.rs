use super::TableStore;
use crate::common::error::{EtlError, Result};
use crate::frame::DataFrame;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// In-memory store for development and testing.
pub struct InMemoryStore {
    tables: Arc<Mutex<HashMap<String, DataFrame>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn read_table(&self, table: &str) -> Result<DataFrame> {
        let tables = self.tables.lock().unwrap();
        tables
            .get(table)
            .cloned()
            .ok_or_else(|| EtlError::TableNotFound(table.to_string()))
    }

    async fn overwrite_table(&self, table: &str, frame: DataFrame) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        debug!(
            "Overwrote table {} with {} rows, {} columns",
            table,
            frame.num_rows(),
            frame.columns().len()
        );
        tables.insert(table.to_string(), frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn read_of_unknown_table_fails() {
        let store = InMemoryStore::new();
        let err = store.read_table("brz.sales").await.unwrap_err();
        assert!(matches!(err, EtlError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn overwrite_replaces_rows_and_schema() {
        let store = InMemoryStore::new();

        let mut first = DataFrame::empty(vec!["a"]);
        first.push_row(vec![json!(1)]).unwrap();
        store.overwrite_table("t", first).await.unwrap();

        let second = DataFrame::empty(vec!["a", "b"]);
        store.overwrite_table("t", second).await.unwrap();

        let read = store.read_table("t").await.unwrap();
        assert_eq!(read.num_rows(), 0);
        assert_eq!(read.columns(), &["a", "b"]);
    }
}
