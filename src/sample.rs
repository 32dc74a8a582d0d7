use crate::common::constants::{
    DIM_CAMPAIGN_TABLE, DIM_CUSTOMER_TABLE, DIM_PRODUCT_TABLE, FACT_SALES_TABLE,
    STAGING_SALES_TABLE,
};
use crate::frame::DataFrame;
use crate::schema::{
    staging_columns, DIM_CAMPAIGN_COLUMNS, DIM_CUSTOMER_COLUMNS, DIM_PRODUCT_COLUMNS,
    FACT_SALES_COLUMNS, RAW_COLUMNS,
};
use serde_json::{json, Value};

struct SampleSale {
    date: &'static str,
    customer_id: &'static str,
    product_id: &'static str,
    campaign_id: &'static str,
    units: i64,
    unit_cost: f64,
    unit_price: f64,
    email_name: &'static str,
    product: &'static str,
    category: &'static str,
    segment: &'static str,
    manufacturer_id: &'static str,
    manufacturer: &'static str,
    city: &'static str,
    state: &'static str,
    region: &'static str,
    zip_code: &'static str,
    country: &'static str,
}

impl SampleSale {
    fn into_row(self) -> Vec<Value> {
        RAW_COLUMNS
            .iter()
            .map(|&column| match column {
                "Date" => json!(self.date),
                "CustomerID" => json!(self.customer_id),
                "ProductID" => json!(self.product_id),
                "CampaignID" => json!(self.campaign_id),
                "Units" => json!(self.units),
                "Unit Cost" => json!(self.unit_cost),
                "Unit Price" => json!(self.unit_price),
                "Email Name" => json!(self.email_name),
                "Product" => json!(self.product),
                "Category" => json!(self.category),
                "Segment" => json!(self.segment),
                "ManufacturerID" => json!(self.manufacturer_id),
                "Manufacturer" => json!(self.manufacturer),
                "City" => json!(self.city),
                "State" => json!(self.state),
                "Region" => json!(self.region),
                "ZipCode" => json!(self.zip_code),
                "Country" => json!(self.country),
                other => unreachable!("unknown raw column {other}"),
            })
            .collect()
    }
}

/// A small bronze snapshot for local runs: repeated sale lines for the same
/// product and customer (so the dedup behavior is visible in the output) and
/// one display name without a first name.
pub fn sample_raw_frame() -> DataFrame {
    let sales = vec![
        SampleSale {
            date: "2024-03-01",
            customer_id: "C100",
            product_id: "P10",
            campaign_id: "K1",
            units: 4,
            unit_cost: 2.25,
            unit_price: 5.0,
            email_name: "Moreno, Alice (alice.moreno@example.com)",
            product: "Widget",
            category: "Tools",
            segment: "Retail",
            manufacturer_id: "M1",
            manufacturer: "Acme",
            city: "Seattle",
            state: "WA",
            region: "West",
            zip_code: "98101",
            country: "USA",
        },
        SampleSale {
            date: "2024-03-01",
            customer_id: "C100",
            product_id: "P10",
            campaign_id: "K1",
            units: 4,
            unit_cost: 2.25,
            unit_price: 5.0,
            email_name: "Moreno, Alice (alice.moreno@example.com)",
            product: "Widget",
            category: "Tools",
            segment: "Retail",
            manufacturer_id: "M1",
            manufacturer: "Acme",
            city: "Seattle",
            state: "WA",
            region: "West",
            zip_code: "98101",
            country: "USA",
        },
        SampleSale {
            date: "2024-03-02",
            customer_id: "C200",
            product_id: "P20",
            campaign_id: "K2",
            units: 1,
            unit_cost: 11.0,
            unit_price: 19.99,
            email_name: "Okafor (sam.okafor@example.com)",
            product: "Gadget",
            category: "Electronics",
            segment: "Wholesale",
            manufacturer_id: "M2",
            manufacturer: "Globex",
            city: "Portland",
            state: "OR",
            region: "West",
            zip_code: "97201",
            country: "USA",
        },
        SampleSale {
            date: "2024-03-03",
            customer_id: "C200",
            product_id: "P10",
            campaign_id: "K1",
            units: 2,
            unit_cost: 2.25,
            unit_price: 5.0,
            email_name: "Okafor (sam.okafor@example.com)",
            product: "Widget",
            category: "Tools",
            segment: "Retail",
            manufacturer_id: "M1",
            manufacturer: "Acme",
            city: "Portland",
            state: "OR",
            region: "West",
            zip_code: "97201",
            country: "USA",
        },
    ];

    let mut frame = DataFrame::empty(RAW_COLUMNS.to_vec());
    for sale in sales {
        frame
            .push_row(sale.into_row())
            .expect("sample rows match the raw schema");
    }
    frame
}

/// Empty staging and analytical tables with their target schemas, so a fresh
/// warehouse can be truncated and loaded without manual setup.
pub fn empty_target_frames() -> Vec<(&'static str, DataFrame)> {
    vec![
        (STAGING_SALES_TABLE, DataFrame::empty(staging_columns())),
        (DIM_PRODUCT_TABLE, DataFrame::empty(DIM_PRODUCT_COLUMNS.to_vec())),
        (DIM_CUSTOMER_TABLE, DataFrame::empty(DIM_CUSTOMER_COLUMNS.to_vec())),
        (DIM_CAMPAIGN_TABLE, DataFrame::empty(DIM_CAMPAIGN_COLUMNS.to_vec())),
        (FACT_SALES_TABLE, DataFrame::empty(FACT_SALES_COLUMNS.to_vec())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rows_match_raw_schema() {
        let frame = sample_raw_frame();
        assert_eq!(frame.columns().len(), RAW_COLUMNS.len());
        assert!(frame.num_rows() >= 3);
    }

    #[test]
    fn target_frames_cover_all_derived_tables() {
        let frames = empty_target_frames();
        assert_eq!(frames.len(), 5);
        for (_, frame) in frames {
            assert_eq!(frame.num_rows(), 0);
            assert!(!frame.columns().is_empty());
        }
    }
}
