//! Investment operations

use chrono::NaiveDate;

use super::RestStore;
use crate::error::Result;
use crate::models::{Investment, NewInvestment};

const TABLE: &str = "investments";

impl RestStore {
    /// All investment entries, newest first
    pub async fn list_investments(&self) -> Result<Vec<Investment>> {
        self.select(TABLE, &[("order", "date.desc".to_string())])
            .await
    }

    /// Entries dated within `[from, to]`, newest first.
    /// Includes skip markers; callers that sum amounts are unaffected
    /// since markers carry zero.
    pub async fn list_investments_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Investment>> {
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

    pub async fn add_investment(&self, row: &NewInvestment) -> Result<Investment> {
        self.insert(TABLE, row).await
    }

    pub async fn delete_investment(&self, id: i64) -> Result<()> {
        self.delete(TABLE, id).await
    }
}
