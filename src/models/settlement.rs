//! Settlement transfers
//!
//! The output of debt simplification: who should pay whom, and how much.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ParticipantId;
use super::money::Money;

/// A recommended payment from a debtor to a creditor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementTransfer {
    /// Participant who pays (a debtor)
    pub from: ParticipantId,
    /// Participant who receives (a creditor)
    pub to: ParticipantId,
    /// Always strictly positive
    pub amount: Money,
}

impl SettlementTransfer {
    pub(crate) fn new(from: ParticipantId, to: ParticipantId, amount: Money) -> Self {
        debug_assert!(amount.is_positive());
        debug_assert_ne!(from, to);
        Self { from, to, amount }
    }
}

impl fmt::Display for SettlementTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// Ordered list of transfers produced by one simplification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementPlan {
    transfers: Vec<SettlementTransfer>,
}

impl SettlementPlan {
    pub(crate) fn from_transfers(transfers: Vec<SettlementTransfer>) -> Self {
        Self { transfers }
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SettlementTransfer> {
        self.transfers.iter()
    }

    pub fn as_slice(&self) -> &[SettlementTransfer] {
        &self.transfers
    }

    /// Total money moved by the plan, `None` if it exceeds the largest amount
    pub fn total(&self) -> Option<Money> {
        Money::checked_sum(self.transfers.iter().map(|t| t.amount))
    }
}

impl<'a> IntoIterator for &'a SettlementPlan {
    type Item = &'a SettlementTransfer;
    type IntoIter = std::slice::Iter<'a, SettlementTransfer>;

    fn into_iter(self) -> Self::IntoIter {
        self.transfers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_total() {
        let plan = SettlementPlan::from_transfers(vec![
            SettlementTransfer::new(
                ParticipantId::new(1),
                ParticipantId::new(2),
                Money::from_cents(3000),
            ),
            SettlementTransfer::new(
                ParticipantId::new(1),
                ParticipantId::new(3),
                Money::from_cents(2000),
            ),
        ]);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.total(), Some(Money::from_cents(5000)));
        assert_eq!(plan.as_slice()[0].to_string(), "user-1 pays user-2 30.00");
    }

    #[test]
    fn test_plan_serializes_as_list() {
        let plan = SettlementPlan::from_transfers(vec![SettlementTransfer::new(
            ParticipantId::new(2),
            ParticipantId::new(1),
            Money::from_cents(5000),
        )]);
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"[{"from":2,"to":1,"amount":"50.00"}]"#);
    }
}
