// Expense Extraction API - Core Library
// Exposes the extractor for use in CLI, API server, and tests

pub mod error;
pub mod extractor;

// Re-export commonly used types
pub use error::{ExtractError, Result};
pub use extractor::{ExpenseExtractor, ExpenseRecord, COST_CENTRE_UNKNOWN};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
