//! CSV output
//!
//! Transfers as `from,to,amount` rows and balances as
//! `participant_id,balance` rows, with a header line.

use std::io::Write;

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Balances, SettlementPlan};

fn csv_error(e: impl std::fmt::Display) -> SplitbookError {
    SplitbookError::Export(format!("Failed to write CSV: {}", e))
}

/// Write the transfers of a plan
pub fn export_plan_csv<W: Write>(plan: &SettlementPlan, writer: &mut W) -> SplitbookResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["from", "to", "amount"]).map_err(csv_error)?;
    for transfer in plan {
        out.write_record([
            transfer.from.get().to_string(),
            transfer.to.get().to_string(),
            transfer.amount.to_string(),
        ])
        .map_err(csv_error)?;
    }
    out.flush().map_err(csv_error)?;
    Ok(())
}

/// Write net balances
pub fn export_balances_csv<W: Write>(balances: &Balances, writer: &mut W) -> SplitbookResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["participant_id", "balance"]).map_err(csv_error)?;
    for (id, amount) in balances.iter() {
        out.write_record([id.get().to_string(), amount.to_string()])
            .map_err(csv_error)?;
    }
    out.flush().map_err(csv_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, ParticipantId};
    use crate::services::simplify;

    fn sample() -> Balances {
        vec![
            (ParticipantId::new(1), Money::from_cents(5000)),
            (ParticipantId::new(2), Money::from_cents(-5000)),
            (ParticipantId::new(3), Money::zero()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_export_plan_csv() {
        let plan = simplify(&sample()).unwrap();
        let mut buffer = Vec::new();
        export_plan_csv(&plan, &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "from,to,amount\n2,1,50.00\n");
    }

    #[test]
    fn test_export_balances_csv() {
        let mut buffer = Vec::new();
        export_balances_csv(&sample(), &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "participant_id,balance\n1,50.00\n2,-50.00\n3,0.00\n"
        );
    }
}
