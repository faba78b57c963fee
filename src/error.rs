// Validation errors for expense extraction
// Every variant is a client-input error; the HTTP layer maps all of them
// to a 400 response with the Display text as the body.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The fragment could not be parsed as XML at all.
    #[error("Invalid XML format: {message}")]
    MalformedInput { message: String },

    /// No `<expense>` element anywhere in the fragment.
    #[error("No expense node found")]
    MissingExpenseNode,

    /// The `<expense>` element has no `<total>` child.
    #[error("No total node found")]
    MissingTotalNode,

    /// The `<total>` content did not parse as a decimal amount.
    #[error("Invalid total amount: {value}")]
    InvalidTotal { value: String },
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
