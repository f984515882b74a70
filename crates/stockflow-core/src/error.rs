use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockflowError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing source table: {0}")]
    MissingTable(String),

    #[error("Missing column: {table}.{column}")]
    MissingColumn { table: String, column: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for StockflowError {
    fn from(e: serde_json::Error) -> Self {
        StockflowError::SerializationError(e.to_string())
    }
}
