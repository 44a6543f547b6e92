//! Service layer for Splitbook
//!
//! The ledger core: aggregation of journal entries into balances and
//! simplification of balances into settlement transfers. Both work on fully
//! materialized snapshots; `import` is the only part that touches files.

pub mod import;
pub mod ledger;
pub mod simplify;

pub use import::{JournalSnapshot, SnapshotFormat};
pub use ledger::{
    compute_balance, compute_group_balances, compute_transaction_balances, select_transactions,
    summarize, validate_entries, LedgerSummary, ParticipantSummary,
};
pub use simplify::{settle, simplify, verify_plan, SettlementReport};
