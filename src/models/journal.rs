//! Journal entry model
//!
//! A journal entry is one debt line produced by a transaction: the payer owes
//! the payee the given amount. Entries are plain values handed to the ledger
//! by whatever loaded them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::ids::{ParticipantId, TransactionId};
use super::money::Money;

/// Opaque per-line payload (item names, quantities, notes...)
pub type ItemDetail = Map<String, Value>;

/// One payer-to-payee obligation tied to a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Transaction that created this line
    pub transaction_id: TransactionId,

    /// Participant who owes
    pub payer_id: ParticipantId,

    /// Participant who is owed
    pub payee_id: ParticipantId,

    /// Amount owed, strictly positive once validated
    pub amount: Money,

    /// Free-form item detail, never interpreted by the ledger
    #[serde(default)]
    pub item_detail: ItemDetail,
}

impl JournalEntry {
    /// Create a journal entry with an empty item detail
    pub fn new(
        transaction_id: TransactionId,
        payer_id: ParticipantId,
        payee_id: ParticipantId,
        amount: Money,
    ) -> Self {
        Self {
            transaction_id,
            payer_id,
            payee_id,
            amount,
            item_detail: ItemDetail::new(),
        }
    }

    /// Attach an item detail payload
    pub fn with_item_detail(mut self, item_detail: ItemDetail) -> Self {
        self.item_detail = item_detail;
        self
    }

    /// Copy of this entry with a replaced amount
    ///
    /// Payer and payee are fixed for the lifetime of a line; changing either
    /// means removing this entry and creating a new one.
    pub fn with_amount(&self, amount: Money) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Whether the participant is on either side of this line
    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.payer_id == participant || self.payee_id == participant
    }

    /// Signed effect of this line on a participant's balance
    ///
    /// Positive when the participant is owed, negative when they owe,
    /// zero when the line does not concern them.
    pub fn effect_on(&self, participant: ParticipantId) -> Money {
        if self.payee_id == participant {
            self.amount
        } else if self.payer_id == participant {
            self.amount.negate()
        } else {
            Money::zero()
        }
    }

    /// Validate the journal entry
    pub fn validate(&self) -> Result<(), JournalValidationError> {
        if self.payer_id == self.payee_id {
            return Err(JournalValidationError::SelfPayment(self.payer_id));
        }

        if !self.amount.is_positive() {
            return Err(JournalValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} owes {} {}",
            self.transaction_id, self.payer_id, self.payee_id, self.amount
        )
    }
}

/// Validation errors for journal entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalValidationError {
    SelfPayment(ParticipantId),
    NonPositiveAmount(Money),
}

impl fmt::Display for JournalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfPayment(id) => {
                write!(f, "payer and payee are the same participant ({})", id)
            }
            Self::NonPositiveAmount(amount) => {
                write!(f, "amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for JournalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(payer: i64, payee: i64, cents: i64) -> JournalEntry {
        JournalEntry::new(
            TransactionId::new(1),
            ParticipantId::new(payer),
            ParticipantId::new(payee),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_effect_on() {
        let e = entry(1, 2, 3000);
        assert_eq!(e.effect_on(ParticipantId::new(1)), Money::from_cents(-3000));
        assert_eq!(e.effect_on(ParticipantId::new(2)), Money::from_cents(3000));
        assert_eq!(e.effect_on(ParticipantId::new(3)), Money::zero());
        assert!(e.involves(ParticipantId::new(2)));
        assert!(!e.involves(ParticipantId::new(3)));
    }

    #[test]
    fn test_validation() {
        assert!(entry(1, 2, 1).validate().is_ok());
        assert_eq!(
            entry(4, 4, 100).validate(),
            Err(JournalValidationError::SelfPayment(ParticipantId::new(4)))
        );
        assert_eq!(
            entry(1, 2, 0).validate(),
            Err(JournalValidationError::NonPositiveAmount(Money::zero()))
        );
        assert!(matches!(
            entry(1, 2, -5).validate(),
            Err(JournalValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_with_amount_keeps_parties() {
        let e = entry(1, 2, 3000);
        let updated = e.with_amount(Money::from_cents(1250));
        assert_eq!(updated.payer_id, e.payer_id);
        assert_eq!(updated.payee_id, e.payee_id);
        assert_eq!(updated.amount, Money::from_cents(1250));
    }

    #[test]
    fn test_deserialize_without_item_detail() {
        let json = r#"{"transaction_id": 9, "payer_id": 1, "payee_id": 2, "amount": "12.30"}"#;
        let e: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.transaction_id, TransactionId::new(9));
        assert_eq!(e.amount, Money::from_cents(1230));
        assert!(e.item_detail.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(entry(1, 2, 3000).to_string(), "txn-1: user-1 owes user-2 30.00");
    }
}
