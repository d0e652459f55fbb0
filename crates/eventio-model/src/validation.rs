use thiserror::Error;

/// Validation errors for model primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a record is not a JSON object.
    #[error("item {index} of collection '{collection}' is not a JSON object")]
    NotAnObject {
        /// Collection the item was pushed into.
        collection: String,
        /// Position of the offending item.
        index: usize,
    },
}
