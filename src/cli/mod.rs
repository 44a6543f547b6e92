//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod balances;
pub mod settle;

use std::path::PathBuf;

use clap::Args;

use crate::config::{OutputFormat, Settings};
use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{GroupId, JournalEntry, TransactionId};
use crate::services::{select_transactions, JournalSnapshot, SnapshotFormat};

pub use balances::{handle_balance_command, handle_balances_command, BalancesArgs};
pub use settle::{
    handle_check_command, handle_settle_command, handle_simplify_command, SettleArgs,
};

/// Where to read the journal from and which part of it to use
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Journal file (.json or .csv)
    pub file: PathBuf,
    /// Input format, when the extension is not .json/.csv
    #[arg(long)]
    pub input_format: Option<String>,
    /// Only use transactions of this group (needs transactions in the file)
    #[arg(short, long)]
    pub group: Option<String>,
    /// Only use these transactions (comma-separated ids)
    #[arg(short, long, value_delimiter = ',')]
    pub transactions: Vec<String>,
}

impl SnapshotArgs {
    /// Load the snapshot and apply group/transaction filters
    pub fn load_entries(&self) -> SplitbookResult<Vec<JournalEntry>> {
        let format = match &self.input_format {
            Some(name) => Some(SnapshotFormat::parse(name).ok_or_else(|| {
                SplitbookError::Validation(format!(
                    "Invalid input format: '{}'. Valid formats: json, csv",
                    name
                ))
            })?),
            None => None,
        };

        let snapshot = JournalSnapshot::load(&self.file, format)?;
        let entries = snapshot.journal_entries()?;

        let mut selection: Option<Vec<TransactionId>> = None;

        if let Some(group) = &self.group {
            let group_id = GroupId::parse(group).map_err(|_| {
                SplitbookError::Validation(format!("Invalid group id: '{}'", group))
            })?;
            selection = Some(snapshot.transaction_ids_for_group(group_id)?);
        }

        if !self.transactions.is_empty() {
            let requested = self
                .transactions
                .iter()
                .map(|raw| {
                    TransactionId::parse(raw).map_err(|_| {
                        SplitbookError::Validation(format!("Invalid transaction id: '{}'", raw))
                    })
                })
                .collect::<SplitbookResult<Vec<_>>>()?;

            selection = Some(match selection {
                Some(in_group) => requested
                    .into_iter()
                    .filter(|id| in_group.contains(id))
                    .collect(),
                None => requested,
            });
        }

        Ok(match selection {
            Some(ids) => select_transactions(&entries, &ids),
            None => entries,
        })
    }
}

/// Resolve `--format`, falling back to the configured default
pub fn resolve_format(requested: Option<&str>, settings: &Settings) -> SplitbookResult<OutputFormat> {
    match requested {
        Some(name) => OutputFormat::parse(name).ok_or_else(|| {
            SplitbookError::Validation(format!(
                "Invalid output format: '{}'. Valid formats: table, json, csv",
                name
            ))
        }),
        None => Ok(settings.output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LEDGER: &str = r#"{
        "transactions": [
            {"id": 1, "group_id": 1, "title": "Dinner", "amount": "50.00",
             "transaction_date": "2025-03-14",
             "breakdowns": [
                {"payer": 1, "payee": 2, "amount": "30.00"},
                {"payer": 1, "payee": 3, "amount": "20.00"}
             ]},
            {"id": 2, "group_id": 2, "title": "Cab", "amount": "8.00",
             "transaction_date": "2025-03-15",
             "breakdowns": [{"payer": 4, "payee": 5, "amount": "8.00"}]},
            {"id": 3, "group_id": 1, "title": "Snacks", "amount": "4.00",
             "transaction_date": "2025-03-16",
             "breakdowns": [{"payer": 2, "payee": 1, "amount": "4.00"}]}
        ]
    }"#;

    fn args(dir: &TempDir, group: Option<&str>, transactions: &[&str]) -> SnapshotArgs {
        let file = dir.path().join("ledger.json");
        std::fs::write(&file, LEDGER).unwrap();
        SnapshotArgs {
            file,
            input_format: None,
            group: group.map(str::to_string),
            transactions: transactions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_load_all_entries() {
        let dir = TempDir::new().unwrap();
        assert_eq!(args(&dir, None, &[]).load_entries().unwrap().len(), 4);
    }

    #[test]
    fn test_group_filter() {
        let dir = TempDir::new().unwrap();
        let entries = args(&dir, Some("grp-1"), &[]).load_entries().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.transaction_id != TransactionId::new(2)));
    }

    #[test]
    fn test_group_and_transaction_filters_intersect() {
        let dir = TempDir::new().unwrap();
        let entries = args(&dir, Some("1"), &["2", "3"]).load_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].transaction_id, TransactionId::new(3));
    }

    #[test]
    fn test_bad_ids_are_validation_errors() {
        let dir = TempDir::new().unwrap();
        assert!(args(&dir, Some("abc"), &[]).load_entries().unwrap_err().is_validation());
        assert!(args(&dir, None, &["x"]).load_entries().unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_format() {
        let settings = Settings::default();
        assert_eq!(resolve_format(None, &settings).unwrap(), OutputFormat::Table);
        assert_eq!(resolve_format(Some("csv"), &settings).unwrap(), OutputFormat::Csv);
        assert!(resolve_format(Some("yaml"), &settings).is_err());
    }
}
