//! Journal snapshot loading
//!
//! Reads the materialized ledger snapshot the core works on. Two file
//! formats are understood:
//!
//! - JSON: either a bare array of journal entries, or an object with
//!   `transactions` (validated and expanded into entries) and/or `entries`.
//! - CSV: `transaction_id,payer_id,payee_id,amount` plus an optional
//!   `item_detail` column holding a JSON object.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{
    Balances, GroupId, ItemDetail, JournalEntry, Money, ParticipantId, Transaction, TransactionId,
    TransactionValidationError,
};

/// Supported snapshot file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Parse a format name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Object form of a JSON ledger file
#[derive(Debug, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    entries: Vec<JournalEntry>,
}

/// One row of a CSV journal file
#[derive(Debug, Deserialize)]
struct CsvRow {
    transaction_id: TransactionId,
    payer_id: ParticipantId,
    payee_id: ParticipantId,
    // Kept as text: a numeric CSV field would otherwise go through f64
    amount: String,
    #[serde(default)]
    item_detail: Option<String>,
}

/// Transactions and loose journal entries read from one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalSnapshot {
    pub transactions: Vec<Transaction>,
    pub entries: Vec<JournalEntry>,
}

impl JournalSnapshot {
    /// Load a snapshot, detecting the format from the extension when not given
    pub fn load(path: &Path, format: Option<SnapshotFormat>) -> SplitbookResult<Self> {
        let format = format
            .or_else(|| SnapshotFormat::from_path(path))
            .ok_or_else(|| {
                SplitbookError::Import(format!(
                    "Cannot tell the format of '{}'; use a .json or .csv file or pass --input-format",
                    path.display()
                ))
            })?;

        let file = std::fs::File::open(path).map_err(|e| {
            SplitbookError::Io(format!("Failed to open '{}': {}", path.display(), e))
        })?;

        let snapshot = match format {
            SnapshotFormat::Json => Self::from_json_reader(file)?,
            SnapshotFormat::Csv => Self::from_csv_reader(file)?,
        };

        info!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            entries = snapshot.entries.len(),
            "loaded journal snapshot"
        );

        Ok(snapshot)
    }

    /// Parse the JSON form
    pub fn from_json_reader<R: Read>(reader: R) -> SplitbookResult<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        match value {
            Value::Array(_) => Ok(Self {
                transactions: Vec::new(),
                entries: serde_json::from_value(value)?,
            }),
            Value::Object(_) => {
                let file: LedgerFile = serde_json::from_value(value)?;
                Ok(Self {
                    transactions: file.transactions,
                    entries: file.entries,
                })
            }
            _ => Err(SplitbookError::Import(
                "expected a JSON array of entries or an object with transactions/entries".into(),
            )),
        }
    }

    /// Parse the CSV form
    pub fn from_csv_reader<R: Read>(reader: R) -> SplitbookResult<Self> {
        let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut entries = Vec::new();

        for (row_number, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            let amount = Money::parse(&row.amount).map_err(|e| {
                SplitbookError::Import(format!("Row {}: {}", row_number + 1, e))
            })?;
            let item_detail = match row.item_detail.as_deref() {
                None | Some("") => ItemDetail::new(),
                Some(raw) => serde_json::from_str(raw).map_err(|e| {
                    SplitbookError::Import(format!(
                        "Row {}: item_detail is not a JSON object: {}",
                        row_number + 1,
                        e
                    ))
                })?,
            };

            entries.push(
                JournalEntry::new(row.transaction_id, row.payer_id, row.payee_id, amount)
                    .with_item_detail(item_detail),
            );
        }

        debug!(rows = entries.len(), "parsed CSV journal");

        Ok(Self {
            transactions: Vec::new(),
            entries,
        })
    }

    /// Every journal entry of the snapshot
    ///
    /// Transactions are validated (including breakdown total against the
    /// declared amount) before their lines are produced. Loose entries
    /// follow, unvalidated: the ledger checks them itself.
    pub fn journal_entries(&self) -> SplitbookResult<Vec<JournalEntry>> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(SplitbookError::Validation(format!(
                    "Transaction {} appears more than once",
                    txn.id
                )));
            }
            entries.extend(txn.journal_entries().map_err(|e| transaction_error(txn, e))?);
        }

        entries.extend(self.entries.iter().cloned());
        Ok(entries)
    }

    /// Ids of the transactions that belong to a group
    pub fn transaction_ids_for_group(&self, group_id: GroupId) -> SplitbookResult<Vec<TransactionId>> {
        if self.transactions.is_empty() {
            return Err(SplitbookError::Validation(
                "Group filtering needs transactions in the snapshot; loose entries carry no group"
                    .into(),
            ));
        }

        Ok(self
            .transactions
            .iter()
            .filter(|t| t.group_id == group_id)
            .map(|t| t.id)
            .collect())
    }
}

/// Read a balances file: `{"1": "-50.00", "2": "50.00"}`
pub fn load_balances(path: &Path) -> SplitbookResult<Balances> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        SplitbookError::Io(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    let balances: Balances = serde_json::from_str(&contents)?;
    debug!(participants = balances.len(), "loaded balances");
    Ok(balances)
}

fn transaction_error(txn: &Transaction, err: TransactionValidationError) -> SplitbookError {
    match err {
        TransactionValidationError::BreakdownMismatch {
            declared,
            breakdown,
        } => SplitbookError::BreakdownMismatch {
            transaction_id: txn.id,
            declared,
            breakdown,
        },
        TransactionValidationError::BreakdownOverflow => {
            SplitbookError::overflow(format!("summing the breakdown of transaction {}", txn.id))
        }
        other => SplitbookError::Validation(format!("Transaction {}: {}", txn.id, other)),
    }
}
