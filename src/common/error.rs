use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Column '{column}' not found in {table}")]
    MissingColumn { table: String, column: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Storage error: {message}")]
    Storage { message: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;
