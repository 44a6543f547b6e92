//! Transaction model
//!
//! A shared expense inside a group. Each transaction declares a total and a
//! breakdown of who owes whom; the breakdown lines become journal entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, ParticipantId, TransactionId};
use super::journal::{ItemDetail, JournalEntry, JournalValidationError};
use super::money::Money;

/// One line of a transaction's split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Participant who owes this share
    pub payer: ParticipantId,
    /// Participant who fronted the money
    pub payee: ParticipantId,
    /// Share amount
    pub amount: Money,
    /// Opaque item payload carried onto the journal entry
    #[serde(default)]
    pub item_detail: ItemDetail,
}

impl Breakdown {
    pub fn new(payer: ParticipantId, payee: ParticipantId, amount: Money) -> Self {
        Self {
            payer,
            payee,
            amount,
            item_detail: ItemDetail::new(),
        }
    }
}

/// A shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier issued by the persistence layer
    pub id: TransactionId,

    /// Group the expense belongs to
    pub group_id: GroupId,

    /// Short title ("Dinner", "Groceries")
    pub title: String,

    /// Declared total; breakdown amounts must add up to it
    pub amount: Money,

    /// When the expense happened
    pub transaction_date: NaiveDate,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_sub_category")]
    pub sub_category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Who owes whom
    #[serde(default)]
    pub breakdowns: Vec<Breakdown>,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_sub_category() -> String {
    "Others".to_string()
}

impl Transaction {
    /// Create a transaction with no breakdown lines yet
    pub fn new(
        id: TransactionId,
        group_id: GroupId,
        title: impl Into<String>,
        amount: Money,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            group_id,
            title: title.into(),
            amount,
            transaction_date,
            category: default_category(),
            sub_category: default_sub_category(),
            notes: None,
            breakdowns: Vec::new(),
        }
    }

    /// Add a breakdown line
    pub fn with_breakdown(mut self, breakdown: Breakdown) -> Self {
        self.breakdowns.push(breakdown);
        self
    }

    /// Sum of all breakdown amounts, `None` if it overflows
    pub fn breakdown_total(&self) -> Option<Money> {
        Money::checked_sum(self.breakdowns.iter().map(|b| b.amount))
    }

    /// Replace the amount of an existing payer/payee line
    ///
    /// A different payer or payee is a different line: remove it and add a
    /// new breakdown instead.
    pub fn replace_breakdown_amount(
        &mut self,
        payer: ParticipantId,
        payee: ParticipantId,
        amount: Money,
    ) -> Result<Money, TransactionValidationError> {
        let line = self
            .breakdowns
            .iter_mut()
            .find(|b| b.payer == payer && b.payee == payee)
            .ok_or(TransactionValidationError::MissingBreakdown { payer, payee })?;
        Ok(std::mem::replace(&mut line.amount, amount))
    }

    /// Remove a payer/payee line, returning it
    pub fn remove_breakdown(
        &mut self,
        payer: ParticipantId,
        payee: ParticipantId,
    ) -> Option<Breakdown> {
        let index = self
            .breakdowns
            .iter()
            .position(|b| b.payer == payer && b.payee == payee)?;
        Some(self.breakdowns.remove(index))
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.title.trim().is_empty() {
            return Err(TransactionValidationError::EmptyTitle);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.breakdowns.is_empty() {
            return Err(TransactionValidationError::NoBreakdown);
        }

        for (index, breakdown) in self.breakdowns.iter().enumerate() {
            self.entry_for(breakdown)
                .validate()
                .map_err(|reason| TransactionValidationError::InvalidBreakdown { index, reason })?;

            let duplicates = self
                .breakdowns
                .iter()
                .filter(|b| b.payer == breakdown.payer && b.payee == breakdown.payee)
                .count();
            if duplicates > 1 {
                return Err(TransactionValidationError::DuplicateBreakdown {
                    payer: breakdown.payer,
                    payee: breakdown.payee,
                });
            }
        }

        let breakdown = self
            .breakdown_total()
            .ok_or(TransactionValidationError::BreakdownOverflow)?;
        if breakdown != self.amount {
            return Err(TransactionValidationError::BreakdownMismatch {
                declared: self.amount,
                breakdown,
            });
        }

        Ok(())
    }

    /// Journal entries produced by this transaction's breakdown
    ///
    /// The transaction is validated first so no entry is produced from an
    /// inconsistent split.
    pub fn journal_entries(&self) -> Result<Vec<JournalEntry>, TransactionValidationError> {
        self.validate()?;
        Ok(self.breakdowns.iter().map(|b| self.entry_for(b)).collect())
    }

    fn entry_for(&self, breakdown: &Breakdown) -> JournalEntry {
        JournalEntry::new(self.id, breakdown.payer, breakdown.payee, breakdown.amount)
            .with_item_detail(breakdown.item_detail.clone())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.transaction_date, self.title, self.amount, self.id
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyTitle,
    NonPositiveAmount(Money),
    NoBreakdown,
    InvalidBreakdown {
        index: usize,
        reason: JournalValidationError,
    },
    DuplicateBreakdown {
        payer: ParticipantId,
        payee: ParticipantId,
    },
    MissingBreakdown {
        payer: ParticipantId,
        payee: ParticipantId,
    },
    BreakdownMismatch {
        declared: Money,
        breakdown: Money,
    },
    BreakdownOverflow,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Transaction title cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::NoBreakdown => write!(f, "Transaction has no breakdown lines"),
            Self::InvalidBreakdown { index, reason } => {
                write!(f, "Breakdown line {} is invalid: {}", index, reason)
            }
            Self::DuplicateBreakdown { payer, payee } => {
                write!(f, "Breakdown line {} -> {} appears more than once", payer, payee)
            }
            Self::MissingBreakdown { payer, payee } => {
                write!(f, "No breakdown line {} -> {}", payer, payee)
            }
            Self::BreakdownMismatch {
                declared,
                breakdown,
            } => write!(
                f,
                "Breakdown sums to {}, declared amount is {}",
                breakdown, declared
            ),
            Self::BreakdownOverflow => {
                write!(f, "Breakdown amounts add up to more than the largest amount")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: i64) -> ParticipantId {
        ParticipantId::new(id)
    }

    fn dinner() -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        Transaction::new(
            TransactionId::new(10),
            GroupId::new(1),
            "Dinner",
            Money::from_cents(5000),
            date,
        )
        .with_breakdown(Breakdown::new(p(1), p(2), Money::from_cents(3000)))
        .with_breakdown(Breakdown::new(p(1), p(3), Money::from_cents(2000)))
    }

    #[test]
    fn test_valid_transaction_produces_entries() {
        let txn = dinner();
        assert!(txn.validate().is_ok());

        let entries = txn.journal_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.transaction_id == TransactionId::new(10)));
        assert_eq!(entries[0].payee_id, p(2));
        assert_eq!(entries[1].amount, Money::from_cents(2000));
    }

    #[test]
    fn test_breakdown_mismatch() {
        let mut txn = dinner();
        txn.amount = Money::from_cents(6000);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::BreakdownMismatch {
                declared: Money::from_cents(6000),
                breakdown: Money::from_cents(5000),
            })
        );
        assert!(txn.journal_entries().is_err());
    }

    #[test]
    fn test_invalid_breakdown_line() {
        let txn = dinner().with_breakdown(Breakdown::new(p(2), p(2), Money::from_cents(1)));
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::InvalidBreakdown { index: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_breakdown_line() {
        let mut txn = dinner().with_breakdown(Breakdown::new(p(1), p(2), Money::from_cents(1)));
        txn.amount = Money::from_cents(5001);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::DuplicateBreakdown { .. })
        ));
    }

    #[test]
    fn test_replace_breakdown_amount() {
        let mut txn = dinner();
        let old = txn
            .replace_breakdown_amount(p(1), p(2), Money::from_cents(2500))
            .unwrap();
        assert_eq!(old, Money::from_cents(3000));
        assert_eq!(txn.breakdown_total(), Some(Money::from_cents(4500)));

        assert!(matches!(
            txn.replace_breakdown_amount(p(3), p(2), Money::from_cents(1)),
            Err(TransactionValidationError::MissingBreakdown { .. })
        ));
    }

    #[test]
    fn test_breakdown_overflow() {
        let txn = dinner()
            .with_breakdown(Breakdown::new(p(4), p(1), Money::MAX))
            .with_breakdown(Breakdown::new(p(5), p(1), Money::MAX));
        assert_eq!(txn.breakdown_total(), None);
        assert_eq!(txn.validate(), Err(TransactionValidationError::BreakdownOverflow));
    }

    #[test]
    fn test_remove_breakdown() {
        let mut txn = dinner();
        let removed = txn.remove_breakdown(p(1), p(3)).unwrap();
        assert_eq!(removed.amount, Money::from_cents(2000));
        assert!(txn.remove_breakdown(p(1), p(3)).is_none());
    }

    #[test]
    fn test_empty_title_and_amount() {
        let mut txn = dinner();
        txn.title = "  ".into();
        assert_eq!(txn.validate(), Err(TransactionValidationError::EmptyTitle));

        let mut txn = dinner();
        txn.amount = Money::zero();
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": 3, "group_id": 1, "title": "Taxi", "amount": "12.00",
            "transaction_date": "2025-01-02",
            "breakdowns": [{"payer": 2, "payee": 1, "amount": "12.00"}]
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.category, "General");
        assert_eq!(txn.sub_category, "Others");
        assert!(txn.validate().is_ok());
    }
}
