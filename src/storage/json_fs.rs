use super::TableStore;
use crate::common::error::{EtlError, Result};
use crate::frame::DataFrame;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Filesystem-backed store: one JSON document per table under a root
/// directory. Overwrites go through a temp file and a rename so a table is
/// never observable half-written.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.root.join(format!("{table}.json"))
    }
}

#[async_trait]
impl TableStore for JsonFileStore {
    async fn read_table(&self, table: &str) -> Result<DataFrame> {
        let path = self.table_path(table);
        if !path.exists() {
            return Err(EtlError::TableNotFound(table.to_string()));
        }
        let bytes = fs::read(&path).await?;
        let frame: DataFrame = serde_json::from_slice(&bytes)?;
        Ok(frame)
    }

    async fn overwrite_table(&self, table: &str, frame: DataFrame) -> Result<()> {
        fs::create_dir_all(&self.root).await?;

        let path = self.table_path(table);
        let tmp_path = self.root.join(format!("{table}.json.tmp"));

        let bytes = serde_json::to_vec_pretty(&frame)?;
        fs::write(&tmp_path, &bytes).await?;
        rename_into_place(&tmp_path, &path).await?;

        debug!(
            "Overwrote table {} at {} ({} rows)",
            table,
            path.display(),
            frame.num_rows()
        );
        Ok(())
    }
}

// Rename is atomic within one filesystem, which the root directory guarantees
async fn rename_into_place(tmp: &Path, target: &Path) -> Result<()> {
    fs::rename(tmp, target).await.map_err(|e| EtlError::Storage {
        message: format!(
            "failed to move {} into place at {}: {}",
            tmp.display(),
            target.display(),
            e
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn round_trips_a_table() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut frame = DataFrame::empty(vec!["CustomerID", "email"]);
        frame
            .push_row(vec![json!("C1"), json!("a@b.com")])
            .unwrap();

        store.overwrite_table("slv.sales", frame.clone()).await.unwrap();
        let read = store.read_table("slv.sales").await.unwrap();
        assert_eq!(read, frame);
    }

    #[tokio::test]
    async fn missing_table_is_an_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let err = store.read_table("gld.dim_product").await.unwrap_err();
        assert!(matches!(err, EtlError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn overwrite_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let frame = DataFrame::empty(vec!["a"]);
        store.overwrite_table("brz.sales", frame).await.unwrap();

        assert!(dir.path().join("brz.sales.json").exists());
        assert!(!dir.path().join("brz.sales.json.tmp").exists());
    }
}
