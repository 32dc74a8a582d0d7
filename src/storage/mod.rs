use crate::common::error::Result;
use crate::frame::DataFrame;
use async_trait::async_trait;

mod in_memory;
mod json_fs;

pub use in_memory::InMemoryStore;
pub use json_fs::JsonFileStore;

/// Storage contract the pipeline runs against: full reads and atomic
/// overwrites of whole tables. Overwriting replaces all visible rows and the
/// incoming frame's schema becomes the table's schema, so added or renamed
/// columns need no migration step.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Reads a table in full. Unknown tables are an error, not an empty frame.
    async fn read_table(&self, table: &str) -> Result<DataFrame>;

    /// Replaces a table's rows and schema in one step.
    async fn overwrite_table(&self, table: &str, frame: DataFrame) -> Result<()>;
}
