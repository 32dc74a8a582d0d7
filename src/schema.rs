use crate::common::error::{EtlError, Result};
use crate::frame::DataFrame;

/// Shared column definitions for every table the pipeline touches. Each stage
/// checks its inputs against these at the boundary instead of discovering a
/// missing column halfway through a write.
// Bronze columns, as produced by the upstream loader. Three of them carry
// embedded spaces and get renamed on the way into staging.
pub const RAW_COLUMNS: [&str; 18] = [
    "Date",
    "CustomerID",
    "ProductID",
    "CampaignID",
    "Units",
    "Unit Cost",
    "Unit Price",
    "Email Name",
    "Product",
    "Category",
    "Segment",
    "ManufacturerID",
    "Manufacturer",
    "City",
    "State",
    "Region",
    "ZipCode",
    "Country",
];

/// The combined display-name column the parser consumes.
pub const EMAIL_NAME_RAW_COLUMN: &str = "Email Name";

/// Bronze column renames applied by the staging load, in order.
pub const STAGING_RENAMES: [(&str, &str); 3] = [
    ("Unit Cost", "Unit_Cost"),
    ("Unit Price", "Unit_Price"),
    ("Email Name", "Email_Name"),
];

/// Columns derived from the display-name column during the staging load.
pub const DERIVED_COLUMNS: [&str; 3] = ["email", "last_name", "first_name"];

pub const DIM_PRODUCT_COLUMNS: [&str; 6] = [
    "ProductID",
    "Product",
    "Category",
    "Segment",
    "ManufacturerID",
    "Manufacturer",
];

// Keeps the derived name/email fields and drops Email_Name on purpose
pub const DIM_CUSTOMER_COLUMNS: [&str; 9] = [
    "CustomerID",
    "email",
    "first_name",
    "last_name",
    "City",
    "State",
    "Region",
    "ZipCode",
    "Country",
];

pub const DIM_CAMPAIGN_COLUMNS: [&str; 1] = ["CampaignID"];

pub const FACT_SALES_COLUMNS: [&str; 7] = [
    "Date",
    "CustomerID",
    "ProductID",
    "CampaignID",
    "Units",
    "Unit_Cost",
    "Unit_Price",
];

/// Staging schema: bronze columns with the renames applied, then the derived
/// columns appended.
pub fn staging_columns() -> Vec<String> {
    let mut columns: Vec<String> = RAW_COLUMNS
        .iter()
        .map(|&c| {
            STAGING_RENAMES
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| to.to_string())
                .unwrap_or_else(|| c.to_string())
        })
        .collect();
    columns.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));
    columns
}

/// Fails with the first column the frame is missing, named against the table
/// the frame was read from.
pub fn require_columns(frame: &DataFrame, table: &str, columns: &[&str]) -> Result<()> {
    for column in columns {
        if !frame.has_column(column) {
            return Err(EtlError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_schema_renames_and_appends() {
        let columns = staging_columns();
        assert!(columns.iter().any(|c| c == "Unit_Cost"));
        assert!(columns.iter().any(|c| c == "Email_Name"));
        assert!(!columns.iter().any(|c| c == "Unit Cost"));
        assert_eq!(columns.last().map(String::as_str), Some("first_name"));
        assert_eq!(columns.len(), RAW_COLUMNS.len() + DERIVED_COLUMNS.len());
    }

    #[test]
    fn require_columns_names_table_and_column() {
        let frame = DataFrame::empty(vec!["CustomerID"]);
        let err = require_columns(&frame, "slv.sales", &DIM_CUSTOMER_COLUMNS).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("slv.sales"));
        assert!(message.contains("email"));
    }

    #[test]
    fn fact_columns_are_a_staging_subset() {
        let staging = staging_columns();
        for column in FACT_SALES_COLUMNS {
            assert!(staging.iter().any(|c| c == column), "missing {column}");
        }
    }
}
