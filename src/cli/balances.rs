//! Balance CLI commands
//!
//! Implements `balances` (every participant) and `balance` (one participant).

use std::io::Write;

use clap::Args;

use super::{resolve_format, SnapshotArgs};
use crate::config::{OutputFormat, Settings};
use crate::display::{format_balances, format_participant_balance, format_summary};
use crate::error::{SplitbookError, SplitbookResult};
use crate::export::{export_balances_csv, export_balances_json};
use crate::models::ParticipantId;
use crate::services::{compute_balance, summarize, validate_entries};

/// Arguments for `balances`
#[derive(Args, Debug, Clone)]
pub struct BalancesArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    /// Show credit and debit totals next to each net balance
    #[arg(short, long)]
    pub detailed: bool,
    /// Output format (table, json, csv)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Handle the `balances` command
pub fn handle_balances_command<W: Write>(
    settings: &Settings,
    args: BalancesArgs,
    out: &mut W,
) -> SplitbookResult<()> {
    let entries = args.snapshot.load_entries()?;
    let summary = summarize(&entries)?;

    match resolve_format(args.format.as_deref(), settings)? {
        OutputFormat::Table => {
            let rendered = if args.detailed || settings.detailed_balances {
                format_summary(&summary, &settings.currency_symbol)
            } else {
                format_balances(&summary.balances(), &settings.currency_symbol)
            };
            writeln!(out, "{}", rendered)?;
        }
        OutputFormat::Json => export_balances_json(&summary.balances(), out)?,
        OutputFormat::Csv => export_balances_csv(&summary.balances(), out)?,
    }

    Ok(())
}

/// Handle the `balance` command
pub fn handle_balance_command<W: Write>(
    settings: &Settings,
    snapshot: SnapshotArgs,
    participant: &str,
    out: &mut W,
) -> SplitbookResult<()> {
    let subject = ParticipantId::parse(participant).map_err(|_| {
        SplitbookError::Validation(format!("Invalid participant id: '{}'", participant))
    })?;

    let entries = snapshot.load_entries()?;
    validate_entries(&entries)?;
    if !entries.iter().any(|entry| entry.involves(subject)) {
        return Err(SplitbookError::participant_not_found(participant));
    }

    let amount = compute_balance(&entries, subject)?;
    writeln!(
        out,
        "{}",
        format_participant_balance(subject, amount, &settings.currency_symbol)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_ledger(dir: &TempDir) -> PathBuf {
        let file = dir.path().join("entries.json");
        std::fs::write(
            &file,
            r#"[
                {"transaction_id": 1, "payer_id": 1, "payee_id": 2, "amount": "30.00"},
                {"transaction_id": 1, "payer_id": 1, "payee_id": 3, "amount": "20.00"}
            ]"#,
        )
        .unwrap();
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

    #[test]
    fn test_balances_json() {
        let dir = TempDir::new().unwrap();
        let args = BalancesArgs {
            snapshot: snapshot(write_ledger(&dir)),
            detailed: false,
            format: Some("json".into()),
        };

        let mut out = Vec::new();
        handle_balances_command(&Settings::default(), args, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["1"], "-50.00");
        assert_eq!(value["2"], "30.00");
        assert_eq!(value["3"], "20.00");
    }

    #[test]
    fn test_single_balance() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        handle_balance_command(
            &Settings::default(),
            snapshot(write_ledger(&dir)),
            "user-1",
            &mut out,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "user-1 owes $50.00\n");
    }

    #[test]
    fn test_malformed_entry_wins_over_unknown_participant() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("entries.json");
        std::fs::write(
            &file,
            r#"[{"transaction_id": 4, "payer_id": 1, "payee_id": 1, "amount": "5.00"}]"#,
        )
        .unwrap();

        let err = handle_balance_command(&Settings::default(), snapshot(file), "9", &mut Vec::new())
            .unwrap_err();
        assert!(err.is_invalid_entry());
    }

    #[test]
    fn test_unknown_participant() {
        let dir = TempDir::new().unwrap();
        let err = handle_balance_command(
            &Settings::default(),
            snapshot(write_ledger(&dir)),
            "42",
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
