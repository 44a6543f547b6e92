//! Balance display formatting
//!
//! Formats net balances and per-participant totals as terminal tables.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Balances, Money, ParticipantId};
use crate::services::LedgerSummary;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Owed to them")]
    credits: String,
    #[tabled(rename = "They owe")]
    debits: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Lines")]
    lines: usize,
}

fn status(amount: Money) -> &'static str {
    if amount.is_positive() {
        "is owed"
    } else if amount.is_negative() {
        "owes"
    } else {
        "settled"
    }
}

/// Format net balances as a table, with a total row
pub fn format_balances(balances: &Balances, symbol: &str) -> String {
    if balances.is_empty() {
        return "No balances: the journal is empty.".to_string();
    }

    let mut rows: Vec<BalanceRow> = balances
        .iter()
        .map(|(id, amount)| BalanceRow {
            participant: id.to_string(),
            balance: amount.format_with_symbol(symbol),
            status: status(amount),
        })
        .collect();

    rows.push(BalanceRow {
        participant: "TOTAL".to_string(),
        balance: match balances.total() {
            Ok(total) => total.format_with_symbol(symbol),
            Err(_) => "out of range".to_string(),
        },
        status: "",
    });

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string()
}

/// Format credit/debit totals for every participant
pub fn format_summary(summary: &LedgerSummary, symbol: &str) -> String {
    if summary.participants.is_empty() {
        return "No balances: the journal is empty.".to_string();
    }

    let rows: Vec<SummaryRow> = summary
        .participants
        .iter()
        .map(|(id, totals)| SummaryRow {
            participant: id.to_string(),
            credits: totals.credits.format_with_symbol(symbol),
            debits: totals.debits.format_with_symbol(symbol),
            net: totals.net().format_with_symbol(symbol),
            lines: totals.entry_count,
        })
        .collect();

    let mut output = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    output.push_str(&format!("\n{} journal lines", summary.entry_count));
    output
}

/// Format a single participant's position as a sentence
pub fn format_participant_balance(participant: ParticipantId, amount: Money, symbol: &str) -> String {
    let shown = amount.abs().format_with_symbol(symbol);
    if amount.is_positive() {
        format!("{} is owed {}", participant, shown)
    } else if amount.is_negative() {
        format!("{} owes {}", participant, shown)
    } else {
        format!("{} is settled up", participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JournalEntry, TransactionId};
    use crate::services::summarize;

    fn p(id: i64) -> ParticipantId {
        ParticipantId::new(id)
    }

    #[test]
    fn test_format_balances() {
        let balances: Balances = vec![
            (p(1), Money::from_cents(-5000)),
            (p(2), Money::from_cents(3000)),
            (p(3), Money::from_cents(2000)),
        ]
        .into_iter()
        .collect();

        let output = format_balances(&balances, "$");
        assert!(output.contains("Participant"));
        assert!(output.contains("user-1"));
        assert!(output.contains("-$50.00"));
        assert!(output.contains("is owed"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("$0.00"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(
            format_balances(&Balances::new(), "$"),
            "No balances: the journal is empty."
        );
    }

    #[test]
    fn test_format_summary() {
        let entries = vec![JournalEntry::new(
            TransactionId::new(1),
            p(1),
            p(2),
            Money::from_cents(1250),
        )];
        let summary = summarize(&entries).unwrap();
        let output = format_summary(&summary, "€");
        assert!(output.contains("Owed to them"));
        assert!(output.contains("€12.50"));
        assert!(output.contains("-€12.50"));
        assert!(output.ends_with("1 journal lines"));
    }

    #[test]
    fn test_format_participant_balance() {
        assert_eq!(
            format_participant_balance(p(1), Money::from_cents(-5000), "$"),
            "user-1 owes $50.00"
        );
        assert_eq!(
            format_participant_balance(p(2), Money::from_cents(3000), "$"),
            "user-2 is owed $30.00"
        );
        assert_eq!(
            format_participant_balance(p(3), Money::zero(), "$"),
            "user-3 is settled up"
        );
    }
}
