pub mod calendar;
pub mod config;
pub mod demand;
pub mod engine;
pub mod error;
pub mod identity;
pub mod output;
pub mod quality;
pub mod recommend;
pub mod revenue;
pub mod supply;
pub mod tables;
pub mod types;
pub mod waterfall;

pub use error::StockflowError;
pub use types::*;

/// Standard result type for all stockflow operations
pub type StockflowResult<T> = Result<T, StockflowError>;
