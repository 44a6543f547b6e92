//! Display formatting for terminal output
//!
//! Renders balances and settlement plans as tables for the terminal.

pub mod balances;
pub mod settlement;

pub use balances::{format_balances, format_participant_balance, format_summary};
pub use settlement::format_plan;
