//! JSON output
//!
//! Machine-readable rendering of balances and settlement plans.

use serde::Serialize;
use std::io::Write;

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Balances, Money, SettlementPlan};
use crate::services::SettlementReport;

/// Document written by `settle --format json`
#[derive(Debug, Serialize)]
pub struct SettlementDocument<'a> {
    pub balances: &'a Balances,
    pub transfers: &'a SettlementPlan,
    pub transfer_count: usize,
    /// `null` when the total is larger than the largest amount
    pub total_transferred: Option<Money>,
}

impl<'a> SettlementDocument<'a> {
    pub fn new(balances: &'a Balances, plan: &'a SettlementPlan) -> Self {
        Self {
            balances,
            transfers: plan,
            transfer_count: plan.len(),
            total_transferred: plan.total(),
        }
    }
}

fn write_pretty<W: Write, T: Serialize>(writer: &mut W, value: &T) -> SplitbookResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| SplitbookError::Export(format!("Failed to write JSON: {}", e)))?;
    writeln!(writer)
        .map_err(|e| SplitbookError::Export(format!("Failed to write JSON: {}", e)))?;
    Ok(())
}

/// Write a settlement report
pub fn export_report_json<W: Write>(report: &SettlementReport, writer: &mut W) -> SplitbookResult<()> {
    write_pretty(writer, &SettlementDocument::new(&report.balances, &report.plan))
}

/// Write a plan computed from caller-supplied balances
pub fn export_plan_json<W: Write>(
    balances: &Balances,
    plan: &SettlementPlan,
    writer: &mut W,
) -> SplitbookResult<()> {
    write_pretty(writer, &SettlementDocument::new(balances, plan))
}

/// Write balances as a participant -> amount object
pub fn export_balances_json<W: Write>(balances: &Balances, writer: &mut W) -> SplitbookResult<()> {
    write_pretty(writer, balances)
}
