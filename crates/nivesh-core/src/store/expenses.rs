//! Expense operations

use chrono::NaiveDate;

use super::RestStore;
use crate::error::Result;
use crate::models::{Expense, NewExpense};

const TABLE: &str = "expenses";

impl RestStore {
    /// All expenses, newest first
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.select(TABLE, &[("order", "date.desc".to_string())])
            .await
    }

    /// Expenses dated within `[from, to]`, newest first
    pub async fn list_expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Expense>> {
        self.select(
            TABLE,
            &[
                ("date", format!("gte.{}", from)),
                ("date", format!("lte.{}", to)),
                ("order", "date.desc".to_string()),
            ],
        )
        .await
    }

    pub async fn add_expense(&self, row: &NewExpense) -> Result<Expense> {
        self.insert(TABLE, row).await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        self.delete(TABLE, id).await
    }
}
