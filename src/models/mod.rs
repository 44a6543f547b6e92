//! Core data models for Splitbook
//!
//! Plain value types for the shared-expense domain: money, identifiers,
//! transactions, journal entries, balances and settlement transfers.

pub mod balance;
pub mod ids;
pub mod journal;
pub mod money;
pub mod settlement;
pub mod transaction;

pub use balance::{Balance, Balances};
pub use ids::{GroupId, ParticipantId, TransactionId};
pub use journal::{ItemDetail, JournalEntry, JournalValidationError};
pub use money::{Money, MoneyParseError};
pub use settlement::{SettlementPlan, SettlementTransfer};
pub use transaction::{Breakdown, Transaction, TransactionValidationError};
