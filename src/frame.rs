use crate::common::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// An ordered, schema-bearing set of rows. Cells are JSON values so a frame
/// can carry whatever column types the upstream loader produced without this
/// crate declaring per-table structs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Creates a frame with the given schema and no rows.
    pub fn empty<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup by row index and column name, mainly for assertions.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Appends a row. The row must match the schema width.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(EtlError::Schema(format!(
                "row width {} does not match schema width {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns the first `n` rows with the schema unchanged. `limit(0)` is
    /// how a table is truncated while keeping its columns.
    pub fn limit(&self, n: usize) -> DataFrame {
        DataFrame {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Projects the named columns, in the order given.
    pub fn select(&self, columns: &[&str]) -> Result<DataFrame> {
        let mut indices = Vec::with_capacity(columns.len());
        for name in columns {
            let idx = self
                .column_index(name)
                .ok_or_else(|| EtlError::Schema(format!("cannot select missing column '{name}'")))?;
            indices.push(idx);
        }

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(DataFrame {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Adds a column from precomputed values, one per row. Replaces the
    /// column in place when the name already exists.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<DataFrame> {
        if values.len() != self.rows.len() {
            return Err(EtlError::Schema(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }

        let mut frame = self.clone();
        match frame.column_index(name) {
            Some(idx) => {
                for (row, value) in frame.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                frame.columns.push(name.to_string());
                for (row, value) in frame.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(frame)
    }

    /// Renames a column, leaving row data untouched.
    pub fn rename_column(&self, from: &str, to: &str) -> Result<DataFrame> {
        let idx = self
            .column_index(from)
            .ok_or_else(|| EtlError::Schema(format!("cannot rename missing column '{from}'")))?;
        if self.has_column(to) {
            return Err(EtlError::Schema(format!(
                "cannot rename '{from}' to '{to}': target column already exists"
            )));
        }

        let mut frame = self.clone();
        frame.columns[idx] = to.to_string();
        Ok(frame)
    }

    /// Removes rows that duplicate an earlier row across every column,
    /// keeping first occurrences in order.
    pub fn drop_duplicates(&self) -> DataFrame {
        let mut seen = HashSet::new();
        let rows = self
            .rows
            .iter()
            .filter(|row| seen.insert(row_digest(row.as_slice())))
            .cloned()
            .collect();

        DataFrame {
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// Content digest of a row, used as the deduplication key.
fn row_digest(row: &[Value]) -> String {
    let mut hasher = Sha256::new();
    for cell in row {
        hasher.update(cell.to_string().as_bytes());
        // Separator so ["ab", "c"] and ["a", "bc"] hash differently
        hasher.update([0x1f]);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_frame() -> DataFrame {
        let mut frame = DataFrame::empty(vec!["id", "name"]);
        frame.push_row(vec![json!(1), json!("widget")]).unwrap();
        frame.push_row(vec![json!(2), json!("gadget")]).unwrap();
        frame.push_row(vec![json!(1), json!("widget")]).unwrap();
        frame
    }

    #[test]
    fn select_projects_in_given_order() {
        let frame = sample_frame();
        let projected = frame.select(&["name", "id"]).unwrap();
        assert_eq!(projected.columns(), &["name", "id"]);
        assert_eq!(projected.value(0, "id"), Some(&json!(1)));
        assert_eq!(projected.value(0, "name"), Some(&json!("widget")));
    }

    #[test]
    fn select_missing_column_fails() {
        let frame = sample_frame();
        assert!(frame.select(&["id", "nope"]).is_err());
    }

    #[test]
    fn drop_duplicates_keeps_first_occurrence() {
        let frame = sample_frame();
        let deduped = frame.drop_duplicates();
        assert_eq!(deduped.num_rows(), 2);
        assert_eq!(deduped.value(0, "id"), Some(&json!(1)));
        assert_eq!(deduped.value(1, "id"), Some(&json!(2)));
    }

    #[test]
    fn limit_zero_keeps_schema() {
        let frame = sample_frame();
        let truncated = frame.limit(0);
        assert_eq!(truncated.num_rows(), 0);
        assert_eq!(truncated.columns(), frame.columns());
    }

    #[test]
    fn rename_preserves_values() {
        let frame = sample_frame();
        let renamed = frame.rename_column("name", "label").unwrap();
        assert!(!renamed.has_column("name"));
        assert_eq!(renamed.value(0, "label"), Some(&json!("widget")));
    }

    #[test]
    fn rename_to_existing_column_fails() {
        let frame = sample_frame();
        assert!(frame.rename_column("name", "id").is_err());
    }

    #[test]
    fn with_column_replaces_existing() {
        let frame = sample_frame();
        let updated = frame
            .with_column("name", vec![json!("a"), json!("b"), json!("c")])
            .unwrap();
        assert_eq!(updated.columns().len(), 2);
        assert_eq!(updated.value(2, "name"), Some(&json!("c")));
    }

    #[test]
    fn with_column_length_mismatch_fails() {
        let frame = sample_frame();
        assert!(frame.with_column("extra", vec![json!(1)]).is_err());
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut frame = DataFrame::empty(vec!["a", "b"]);
        assert!(frame.push_row(vec![json!(1)]).is_err());
    }
}
