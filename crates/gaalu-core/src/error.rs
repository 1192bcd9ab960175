//! Error taxonomy for table construction and emission.
//!
//! Both variants are detected synchronously: a `Config` error fires
//! before any table work starts, an `Invariant` error aborts emission
//! entirely (it indicates a metric or algorithm defect, never a
//! recoverable condition).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GaaluError {
    /// Unknown or unsupported operation/variant selection.
    #[error("unsupported {what}: {value}")]
    Config { what: &'static str, value: String },

    /// A known algebraic identity failed to hold.
    #[error("algebra invariant violated: {detail}")]
    Invariant { detail: String },
}

impl GaaluError {
    pub fn config(what: &'static str, value: impl Into<String>) -> Self {
        GaaluError::Config { what, value: value.into() }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        GaaluError::Invariant { detail: detail.into() }
    }
}
