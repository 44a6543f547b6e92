//! Debt simplification
//!
//! Reduces a zero-sum set of net balances to a short list of transfers that
//! settles everyone. The matcher is greedy: the largest creditor is always
//! paid by the largest debtor, for as much as the smaller of the two allows.
//!
//! Each step settles at least one participant completely, so `N` nonzero
//! balances need at most `N - 1` transfers. Greedy matching is not a proven
//! minimum: some inputs have a shorter plan that pairs off equal-and-opposite
//! subsets first (see `greedy_is_not_always_minimal` below). Finding the true
//! minimum is a subset-sum style search and is deliberately not attempted.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Balances, JournalEntry, Money, ParticipantId, SettlementPlan, SettlementTransfer};

use super::ledger::compute_group_balances;

/// Working-set key: magnitude first, then lower ids ranked higher on ties
type Ranked = (Money, Reverse<ParticipantId>);

/// Balances together with the plan that settles them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReport {
    pub balances: Balances,
    pub plan: SettlementPlan,
}

/// Compute the settlement plan for a set of net balances
///
/// Fails with [`SplitbookError::BalanceMismatch`] when the balances do not
/// sum to exactly zero, or with [`SplitbookError::Overflow`] when their sum
/// is too large to represent; no partial plan is returned in either case. The input
/// is left untouched, and the output depends only on its contents, not on
/// how the caller built it.
pub fn simplify(balances: &Balances) -> SplitbookResult<SettlementPlan> {
    let total = balances.total().map_err(|err| {
        warn!(participants = balances.len(), "balance total is out of range");
        err
    })?;
    if !total.is_zero() {
        warn!(%total, participants = balances.len(), "balances do not sum to zero");
        return Err(SplitbookError::BalanceMismatch { total });
    }

    let mut creditors: BTreeSet<Ranked> = BTreeSet::new();
    let mut debtors: BTreeSet<Ranked> = BTreeSet::new();
    for (id, amount) in balances.iter() {
        if amount.is_positive() {
            creditors.insert((amount, Reverse(id)));
        } else if amount.is_negative() {
            debtors.insert((amount.negate(), Reverse(id)));
        }
    }

    let participants = creditors.len() + debtors.len();
    let mut transfers = Vec::with_capacity(participants.saturating_sub(1));

    // Zero-sum means both sides run out on the same step.
    while let (Some((credit, Reverse(creditor))), Some((debt, Reverse(debtor)))) =
        (creditors.pop_last(), debtors.pop_last())
    {
        let amount = credit.min(debt);
        debug!(from = %debtor, to = %creditor, %amount, "settlement transfer");
        transfers.push(SettlementTransfer::new(debtor, creditor, amount));

        let credit_left = credit
            .checked_sub(amount)
            .ok_or_else(|| SplitbookError::overflow("reducing a credit"))?;
        if !credit_left.is_zero() {
            creditors.insert((credit_left, Reverse(creditor)));
        }
        let debt_left = debt
            .checked_sub(amount)
            .ok_or_else(|| SplitbookError::overflow("reducing a debt"))?;
        if !debt_left.is_zero() {
            debtors.insert((debt_left, Reverse(debtor)));
        }
    }
    debug_assert!(creditors.is_empty() && debtors.is_empty());

    info!(
        participants,
        transfers = transfers.len(),
        "simplified balances"
    );

    Ok(SettlementPlan::from_transfers(transfers))
}

/// Check that replaying a plan settles every balance
pub fn verify_plan(balances: &Balances, plan: &SettlementPlan) -> SplitbookResult<()> {
    let replayed = balances.apply(plan.as_slice())?;
    if let Some((id, amount)) = replayed.iter().find(|(_, amount)| !amount.is_zero()) {
        return Err(SplitbookError::Validation(format!(
            "settlement plan leaves {} at {}",
            id, amount
        )));
    }
    Ok(())
}

/// Aggregate a journal snapshot and simplify it in one go
pub fn settle(entries: &[JournalEntry]) -> SplitbookResult<SettlementReport> {
    let balances = compute_group_balances(entries)?;
    let plan = simplify(&balances)?;
    Ok(SettlementReport { balances, plan })
}
