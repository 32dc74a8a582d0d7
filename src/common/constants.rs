/// Table identifiers used across the pipeline.
/// These are literal constants on purpose: the layered layout is fixed and a
/// rename here must be matched by the upstream loader that fills the bronze
/// table.
// Bronze: unprocessed sales records, populated upstream, read-only here
pub const RAW_SALES_TABLE: &str = "brz.sales";

// Silver: cleaned single-table representation, rebuilt every run
pub const STAGING_SALES_TABLE: &str = "slv.sales";

// Gold: star schema, rebuilt every run
pub const DIM_PRODUCT_TABLE: &str = "gld.dim_product";
pub const DIM_CUSTOMER_TABLE: &str = "gld.dim_customer";
pub const DIM_CAMPAIGN_TABLE: &str = "gld.dim_campaign";
pub const FACT_SALES_TABLE: &str = "gld.fact_sales";

/// Analytical tables in the order they are truncated and loaded.
pub const ANALYTICAL_TABLES: [&str; 4] = [
    DIM_PRODUCT_TABLE,
    DIM_CUSTOMER_TABLE,
    DIM_CAMPAIGN_TABLE,
    FACT_SALES_TABLE,
];
