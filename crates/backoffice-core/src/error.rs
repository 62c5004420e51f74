use thiserror::Error;

/// Errors raised by the in-memory list and edit models.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Pending stock text that is not a non-negative integer.
    #[error("invalid stock value {input:?}: expected a non-negative integer")]
    InvalidStock { input: String },

    #[error("product {product_id} must have at least one {field} option")]
    EmptyOptions { product_id: i64, field: &'static str },

    #[error("variant {variant_id} is not in the current table")]
    UnknownVariant { variant_id: i64 },

    /// A save for `variant_id` is in flight; the session cannot change until it resolves.
    #[error("stock save for variant {variant_id} is still in flight")]
    SaveInFlight { variant_id: i64 },

    #[error("batch stock save for product {product_id} is still in flight")]
    BatchInFlight { product_id: i64 },

    #[error("invalid product form: {0}")]
    InvalidForm(String),

    #[error("unrecognised sort parameter {0:?}")]
    InvalidSort(String),
}
