//! CSV export for expenses and investments

use std::io::Write;

use crate::error::Result;
use crate::models::{Expense, Investment};

/// Write expenses as CSV, headers first, dates as YYYY-MM-DD
pub fn write_expenses_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date", "category", "description", "amount"])?;
    for expense in expenses {
        csv_writer.write_record([
            expense.date.to_string(),
            expense.category.clone(),
            expense.description.clone().unwrap_or_default(),
            format!("{:.2}", expense.amount),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write investments as CSV, headers first, dates as YYYY-MM-DD
pub fn write_investments_csv<W: Write>(writer: W, investments: &[Investment]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date", "kind", "name", "amount", "notes"])?;
    for investment in investments {
        csv_writer.write_record([
            investment.date.to_string(),
            investment.kind.to_string(),
            investment.name.clone(),
            format!("{:.2}", investment.amount),
            investment.notes.clone().unwrap_or_default(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvestmentKind;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_expenses_csv() {
        let expenses = [Expense {
            id: 1,
            user_id: "u1".to_string(),
            category: "Food".to_string(),
            description: Some("groceries, veggies".to_string()),
            amount: 1234.5,
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            created_at: Utc::now(),
        }];

        let mut buf = Vec::new();
        write_expenses_csv(&mut buf, &expenses).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("date,category,description,amount\n"));
        // Comma in the description gets quoted
        assert!(text.contains("2026-08-01,Food,\"groceries, veggies\",1234.50"));
    }

    #[test]
    fn test_investments_csv() {
        let investments = [Investment {
            id: 1,
            user_id: "u1".to_string(),
            sip_plan_id: Some(3),
            kind: InvestmentKind::Sip,
            name: "Index Fund".to_string(),
            amount: 5000.0,
            date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            notes: None,
            created_at: Utc::now(),
        }];

        let mut buf = Vec::new();
        write_investments_csv(&mut buf, &investments).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("date,kind,name,amount,notes\n"));
        assert!(text.contains("2026-08-25,sip,Index Fund,5000.00,"));
    }
}
