//! Custom error types for Splitbook
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{Money, TransactionId};

/// The main error type for Splitbook operations
#[derive(Error, Debug)]
pub enum SplitbookError {
    /// Balances handed to the simplifier do not sum to zero
    #[error("Mismatched balance, cannot simplify: balances sum to {total}, expected 0.00")]
    BalanceMismatch { total: Money },

    /// A journal entry failed validation before aggregation
    #[error("Invalid journal entry #{index} (transaction {transaction_id}): {reason}")]
    InvalidEntry {
        index: usize,
        transaction_id: TransactionId,
        reason: String,
    },

    /// A transaction's breakdown lines do not add up to its declared amount
    #[error("Breakdown of transaction {transaction_id} sums to {breakdown}, declared amount is {declared}")]
    BreakdownMismatch {
        transaction_id: TransactionId,
        declared: Money,
        breakdown: Money,
    },

    /// A sum or difference of amounts left the representable range
    #[error("Amount overflow while {0}")]
    Overflow(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SplitbookError {
    /// Create a "not found" error for participants
    pub fn participant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Participant",
            identifier: identifier.into(),
        }
    }

    /// Create an overflow error describing what was being computed
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow(context.into())
    }

    /// Check if this is a balance mismatch
    pub fn is_balance_mismatch(&self) -> bool {
        matches!(self, Self::BalanceMismatch { .. })
    }

    /// Check if this is an invalid journal entry
    pub fn is_invalid_entry(&self) -> bool {
        matches!(self, Self::InvalidEntry { .. })
    }

    /// Check if this is an amount overflow
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow(_))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::BreakdownMismatch { .. } | Self::InvalidEntry { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SplitbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SplitbookError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for Splitbook operations
pub type SplitbookResult<T> = Result<T, SplitbookError>;
