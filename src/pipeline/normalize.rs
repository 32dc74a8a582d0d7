use crate::common::constants::{RAW_SALES_TABLE, STAGING_SALES_TABLE};
use crate::common::error::Result;
use crate::frame::DataFrame;
use crate::parser::parse_email_name;
use crate::schema::{self, DERIVED_COLUMNS, EMAIL_NAME_RAW_COLUMN, STAGING_RENAMES};
use crate::storage::TableStore;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Loads the raw table into staging: derives email and name columns from the
/// combined display-name field, renames the space-containing columns, and
/// overwrites the staging table row-for-row.
pub struct Normalizer {
    store: Arc<dyn TableStore>,
}

impl Normalizer {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Runs the raw → staging load. Returns the number of staged rows.
    pub async fn run(&self) -> Result<usize> {
        let raw = self.store.read_table(RAW_SALES_TABLE).await?;
        schema::require_columns(
            &raw,
            RAW_SALES_TABLE,
            &[
                EMAIL_NAME_RAW_COLUMN,
                STAGING_RENAMES[0].0,
                STAGING_RENAMES[1].0,
            ],
        )?;

        let staged = normalize_frame(&raw)?;
        let row_count = staged.num_rows();

        self.store.overwrite_table(STAGING_SALES_TABLE, staged).await?;
        info!("Loaded {} rows into {}", row_count, STAGING_SALES_TABLE);
        Ok(row_count)
    }
}

/// Pure raw → staging transformation: same row count, three derived columns
/// appended, three columns renamed.
pub fn normalize_frame(raw: &DataFrame) -> Result<DataFrame> {
    let mut emails = Vec::with_capacity(raw.num_rows());
    let mut last_names = Vec::with_capacity(raw.num_rows());
    let mut first_names = Vec::with_capacity(raw.num_rows());

    for row in 0..raw.num_rows() {
        let combined = raw
            .value(row, EMAIL_NAME_RAW_COLUMN)
            .and_then(Value::as_str)
            .unwrap_or("");
        let parsed = parse_email_name(combined);

        // Absent pieces land as empty strings, matching the silent-empty
        // email rule rather than failing the row
        emails.push(Value::String(parsed.email.unwrap_or_default()));
        last_names.push(Value::String(parsed.last_name.unwrap_or_default()));
        first_names.push(Value::String(parsed.first_name.unwrap_or_default()));
    }

    let [email_col, last_col, first_col] = DERIVED_COLUMNS;
    let mut staged = raw
        .with_column(email_col, emails)?
        .with_column(last_col, last_names)?
        .with_column(first_col, first_names)?;

    for (from, to) in STAGING_RENAMES {
        staged = staged.rename_column(from, to)?;
    }

    Ok(staged)
}
