//! Splitbook - shared-expense ledger
//!
//! This library computes each participant's net balance from a journal of
//! who-owes-whom lines, and reduces those balances to a short list of
//! settlement transfers.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (money, ids, journal entries, balances, plans)
//! - `services`: Aggregation, simplification and snapshot loading
//! - `display`: Terminal tables
//! - `export`: JSON and CSV output
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use splitbook::models::{JournalEntry, Money, ParticipantId, TransactionId};
//! use splitbook::services::settle;
//!
//! let entries = vec![
//!     JournalEntry::new(
//!         TransactionId::new(1),
//!         ParticipantId::new(1),
//!         ParticipantId::new(2),
//!         Money::from_cents(3000),
//!     ),
//! ];
//! let report = settle(&entries)?;
//! assert_eq!(report.plan.len(), 1);
//! # Ok::<(), splitbook::SplitbookError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{SplitbookError, SplitbookResult};
