//! Settlement plan display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::SettlementPlan;

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "#")]
    step: usize,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a settlement plan as a numbered table of transfers
pub fn format_plan(plan: &SettlementPlan, symbol: &str) -> String {
    if plan.is_empty() {
        return "Everyone is settled up. No transfers needed.".to_string();
    }

    let rows: Vec<TransferRow> = plan
        .iter()
        .enumerate()
        .map(|(i, t)| TransferRow {
            step: i + 1,
            from: t.from.to_string(),
            to: t.to.to_string(),
            amount: t.amount.format_with_symbol(symbol),
        })
        .collect();

    let mut output = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()))
        .to_string();

    output.push_str(&format!(
        "\n{} transfer{}",
        plan.len(),
        if plan.len() == 1 { "" } else { "s" }
    ));
    if let Some(total) = plan.total() {
        output.push_str(&format!(" moving {}", total.format_with_symbol(symbol)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Balances, Money, ParticipantId};
    use crate::services::simplify;

    #[test]
    fn test_format_plan() {
        let balances: Balances = vec![
            (ParticipantId::new(1), Money::from_cents(10000)),
            (ParticipantId::new(2), Money::from_cents(-4000)),
            (ParticipantId::new(3), Money::from_cents(-6000)),
        ]
        .into_iter()
        .collect();
        let plan = simplify(&balances).unwrap();

        let output = format_plan(&plan, "$");
        assert!(output.contains("From"));
        assert!(output.contains("user-3"));
        assert!(output.contains("$60.00"));
        assert!(output.ends_with("2 transfers moving $100.00"));
    }

    #[test]
    fn test_format_empty_plan() {
        assert_eq!(
            format_plan(&SettlementPlan::default(), "$"),
            "Everyone is settled up. No transfers needed."
        );
    }
}
