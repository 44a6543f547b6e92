//! Balance model
//!
//! Balances are derived values: recomputed from journal entries on demand
//! and never stored. A positive amount is owed to the participant, a
//! negative amount is owed by them.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::error::{SplitbookError, SplitbookResult};

use super::ids::ParticipantId;
use super::money::Money;
use super::settlement::SettlementTransfer;

/// A participant's net signed position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub participant_id: ParticipantId,
    pub amount: Money,
}

impl Balance {
    pub fn new(participant_id: ParticipantId, amount: Money) -> Self {
        Self {
            participant_id,
            amount,
        }
    }

    /// Owed money by the rest of the group
    pub fn is_creditor(&self) -> bool {
        self.amount.is_positive()
    }

    /// Owes money to the rest of the group
    pub fn is_debtor(&self) -> bool {
        self.amount.is_negative()
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.participant_id, self.amount)
    }
}

/// Net balances keyed by participant, iterated in ascending id order
///
/// Serializes as a JSON object: `{"1": "-50.00", "2": "30.00"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances {
    amounts: BTreeMap<ParticipantId, Money>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a participant's balance, replacing any previous value
    pub fn insert(&mut self, participant: ParticipantId, amount: Money) -> Option<Money> {
        self.amounts.insert(participant, amount)
    }

    pub fn get(&self, participant: ParticipantId) -> Option<Money> {
        self.amounts.get(&participant).copied()
    }

    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.amounts.contains_key(&participant)
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, Money)> + '_ {
        self.amounts.iter().map(|(id, amount)| (*id, *amount))
    }

    /// Sum of every balance; zero for any closed group
    ///
    /// The sum is exact regardless of order. It fails only when the final
    /// total itself is out of range, which also means it is not zero.
    pub fn total(&self) -> SplitbookResult<Money> {
        Money::checked_sum(self.amounts.values().copied())
            .ok_or_else(|| SplitbookError::overflow("summing balances"))
    }

    pub fn is_zero_sum(&self) -> bool {
        matches!(self.total(), Ok(total) if total.is_zero())
    }

    /// Every participant sits at exactly zero
    pub fn is_settled(&self) -> bool {
        self.amounts.values().all(Money::is_zero)
    }

    pub fn nonzero_count(&self) -> usize {
        self.amounts.values().filter(|m| !m.is_zero()).count()
    }

    pub fn to_vec(&self) -> Vec<Balance> {
        self.iter().map(|(id, amount)| Balance::new(id, amount)).collect()
    }

    /// Replay transfers on a copy of these balances
    ///
    /// Paying moves the debtor up toward zero and the creditor down toward
    /// zero. Participants missing from the map start at zero.
    pub fn apply(&self, transfers: &[SettlementTransfer]) -> SplitbookResult<Balances> {
        let mut replayed = self.clone();
        for transfer in transfers {
            let from = replayed.amounts.entry(transfer.from).or_default();
            *from = from
                .checked_add(transfer.amount)
                .ok_or_else(|| SplitbookError::overflow(format!("replaying {}", transfer)))?;

            let to = replayed.amounts.entry(transfer.to).or_default();
            *to = to
                .checked_sub(transfer.amount)
                .ok_or_else(|| SplitbookError::overflow(format!("replaying {}", transfer)))?;
        }
        Ok(replayed)
    }
}

impl FromIterator<(ParticipantId, Money)> for Balances {
    /// A repeated participant keeps the last amount given
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Money)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Balance> for Balances {
    fn from_iter<I: IntoIterator<Item = Balance>>(iter: I) -> Self {
        iter.into_iter()
            .map(|b| (b.participant_id, b.amount))
            .collect()
    }
}

impl IntoIterator for Balances {
    type Item = (ParticipantId, Money);
    type IntoIter = btree_map::IntoIter<ParticipantId, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.amounts.into_iter()
    }
}
