//! Export module for Splitbook
//!
//! Writes balances and settlement plans in machine-readable formats.

pub mod csv;
pub mod json;

pub use self::csv::{export_balances_csv, export_plan_csv};
pub use self::json::{export_balances_json, export_plan_json, export_report_json, SettlementDocument};
