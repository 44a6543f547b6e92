//! Ledger aggregation
//!
//! Turns a materialized snapshot of journal entries into per-participant net
//! balances. Every function here is pure: the caller is responsible for
//! handing in a consistent snapshot (all lines of the relevant transactions,
//! read together).

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Balances, JournalEntry, Money, ParticipantId, TransactionId};

/// Per-participant totals behind a net balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticipantSummary {
    /// Sum of lines where the participant is payee (owed to them)
    pub credits: Money,
    /// Sum of lines where the participant is payer (they owe)
    pub debits: Money,
    /// Number of lines the participant appears on
    pub entry_count: usize,
}

impl ParticipantSummary {
    /// Net position: credits minus debits
    pub fn net(&self) -> Money {
        // Both totals are non-negative, so the difference is always in range
        Money::from_cents(self.credits.cents() - self.debits.cents())
    }
}

/// Totals for every participant of a snapshot, ordered by participant id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub participants: BTreeMap<ParticipantId, ParticipantSummary>,
    /// Number of journal lines aggregated
    pub entry_count: usize,
}

impl LedgerSummary {
    /// Net balances derived from the totals
    pub fn balances(&self) -> Balances {
        self.participants
            .iter()
            .map(|(id, summary)| (*id, summary.net()))
            .collect()
    }

    pub fn get(&self, participant: ParticipantId) -> Option<&ParticipantSummary> {
        self.participants.get(&participant)
    }
}

/// Reject the snapshot if any line is malformed
///
/// Fails on the first line whose payer equals its payee or whose amount is
/// not strictly positive.
pub fn validate_entries(entries: &[JournalEntry]) -> SplitbookResult<()> {
    for (index, entry) in entries.iter().enumerate() {
        if let Err(reason) = entry.validate() {
            warn!(index, transaction = %entry.transaction_id, %reason, "rejecting journal entry");
            return Err(SplitbookError::InvalidEntry {
                index,
                transaction_id: entry.transaction_id,
                reason: reason.to_string(),
            });
        }
    }
    Ok(())
}

/// Net position of a single participant
///
/// Amounts where `subject` is payee minus amounts where `subject` is payer.
/// Lines that do not involve the subject are ignored.
pub fn compute_balance(entries: &[JournalEntry], subject: ParticipantId) -> SplitbookResult<Money> {
    validate_entries(entries)?;

    Money::checked_sum(entries.iter().map(|entry| entry.effect_on(subject)))
        .ok_or_else(|| SplitbookError::overflow(format!("computing the balance of {}", subject)))
}

/// Credit and debit totals for every participant, in one pass
pub fn summarize(entries: &[JournalEntry]) -> SplitbookResult<LedgerSummary> {
    validate_entries(entries)?;

    let mut summary = LedgerSummary {
        participants: BTreeMap::new(),
        entry_count: entries.len(),
    };

    for entry in entries {
        let payee = summary.participants.entry(entry.payee_id).or_default();
        payee.credits = payee
            .credits
            .checked_add(entry.amount)
            .ok_or_else(|| overflow_at(entry))?;
        payee.entry_count += 1;

        let payer = summary.participants.entry(entry.payer_id).or_default();
        payer.debits = payer
            .debits
            .checked_add(entry.amount)
            .ok_or_else(|| overflow_at(entry))?;
        payer.entry_count += 1;
    }

    debug!(
        entries = summary.entry_count,
        participants = summary.participants.len(),
        "aggregated journal entries"
    );

    Ok(summary)
}

fn overflow_at(entry: &JournalEntry) -> SplitbookError {
    SplitbookError::overflow(format!("adding up {}", entry))
}

/// Net balances of every participant appearing in the entries
///
/// An empty snapshot yields empty balances. A participant whose lines cancel
/// out is still present, at zero.
pub fn compute_group_balances(entries: &[JournalEntry]) -> SplitbookResult<Balances> {
    Ok(summarize(entries)?.balances())
}

/// Group balances restricted to a set of transactions
///
/// This is how a group's balances are taken from a wider snapshot: pass the
/// ids of the group's transactions.
pub fn compute_transaction_balances(
    entries: &[JournalEntry],
    transaction_ids: &[TransactionId],
) -> SplitbookResult<Balances> {
    compute_group_balances(&select_transactions(entries, transaction_ids))
}

/// Entries belonging to any of the given transactions, in input order
pub fn select_transactions(
    entries: &[JournalEntry],
    transaction_ids: &[TransactionId],
) -> Vec<JournalEntry> {
    let wanted: HashSet<TransactionId> = transaction_ids.iter().copied().collect();
    let selected: Vec<JournalEntry> = entries
        .iter()
        .filter(|entry| wanted.contains(&entry.transaction_id))
        .cloned()
        .collect();

    debug!(
        requested = wanted.len(),
        selected = selected.len(),
        "filtered journal entries by transaction"
    );

    selected
}
