//! Settlement CLI commands
//!
//! Implements `settle`, `simplify` and `check`.

use std::io::Write;
use std::path::Path;

use clap::Args;

use super::{resolve_format, SnapshotArgs};
use crate::config::{OutputFormat, Settings};
use crate::display::{format_balances, format_plan};
use crate::error::SplitbookResult;
use crate::export::{export_plan_csv, export_plan_json, export_report_json};
use crate::services::import::load_balances;
use crate::services::{settle, simplify, summarize, verify_plan};

/// Arguments for `settle`
#[derive(Args, Debug, Clone)]
pub struct SettleArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    /// Output format (table, json, csv)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Handle the `settle` command
pub fn handle_settle_command<W: Write>(
    settings: &Settings,
    args: SettleArgs,
    out: &mut W,
) -> SplitbookResult<()> {
    let entries = args.snapshot.load_entries()?;
    let report = settle(&entries)?;

    match resolve_format(args.format.as_deref(), settings)? {
        OutputFormat::Table => {
            writeln!(out, "{}", format_balances(&report.balances, &settings.currency_symbol))?;
            writeln!(out)?;
            writeln!(out, "{}", format_plan(&report.plan, &settings.currency_symbol))?;
        }
        OutputFormat::Json => export_report_json(&report, out)?,
        OutputFormat::Csv => export_plan_csv(&report.plan, out)?,
    }

    Ok(())
}

/// Handle the `simplify` command: plan from a balances file
pub fn handle_simplify_command<W: Write>(
    settings: &Settings,
    path: &Path,
    format: Option<&str>,
    out: &mut W,
) -> SplitbookResult<()> {
    let balances = load_balances(path)?;
    let plan = simplify(&balances)?;

    match resolve_format(format, settings)? {
        OutputFormat::Table => {
            writeln!(out, "{}", format_plan(&plan, &settings.currency_symbol))?;
        }
        OutputFormat::Json => export_plan_json(&balances, &plan, out)?,
        OutputFormat::Csv => export_plan_csv(&plan, out)?,
    }

    Ok(())
}

/// Handle the `check` command
///
/// Validates the snapshot, then replays the computed plan against the
/// balances it came from.
pub fn handle_check_command<W: Write>(snapshot: SnapshotArgs, out: &mut W) -> SplitbookResult<()> {
    let entries = snapshot.load_entries()?;
    let summary = summarize(&entries)?;
    let balances = summary.balances();
    let plan = simplify(&balances)?;
    verify_plan(&balances, &plan)?;

    writeln!(
        out,
        "OK: {} journal lines, {} participants, settled in {} transfer{}",
        summary.entry_count,
        summary.participants.len(),
        plan.len(),
        if plan.len() == 1 { "" } else { "s" }
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let file = dir.path().join(name);
        std::fs::write(&file, contents).unwrap();
        file
    }

    fn snapshot(file: PathBuf) -> SnapshotArgs {
        SnapshotArgs {
            file,
            input_format: None,
            group: None,
            transactions: Vec::new(),
        }
    }

    const ENTRIES_CSV: &str = "transaction_id,payer_id,payee_id,amount\n\
                               1,2,1,40.00\n\
                               1,3,1,60.00\n";

    #[test]
    fn test_settle_csv_output() {
        let dir = TempDir::new().unwrap();
        let args = SettleArgs {
            snapshot: snapshot(write(&dir, "entries.csv", ENTRIES_CSV)),
            format: Some("csv".into()),
        };

        let mut out = Vec::new();
        handle_settle_command(&Settings::default(), args, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "from,to,amount\n3,1,60.00\n2,1,40.00\n"
        );
    }

    #[test]
    fn test_simplify_rejects_mismatch() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "balances.json", r#"{"1": "10.00", "2": "-5.00"}"#);

        let err = handle_simplify_command(&Settings::default(), &file, None, &mut Vec::new())
            .unwrap_err();
        assert!(err.is_balance_mismatch());
    }

    #[test]
    fn test_simplify_json() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "balances.json", r#"{"1": "50.00", "2": "-50.00"}"#);

        let mut out = Vec::new();
        handle_simplify_command(&Settings::default(), &file, Some("json"), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["transfer_count"], 1);
        assert_eq!(value["transfers"][0]["from"], 2);
        assert_eq!(value["transfers"][0]["to"], 1);
    }

    #[test]
    fn test_check_reports_plan() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        handle_check_command(snapshot(write(&dir, "entries.csv", ENTRIES_CSV)), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "OK: 2 journal lines, 3 participants, settled in 2 transfers\n"
        );
    }
}
