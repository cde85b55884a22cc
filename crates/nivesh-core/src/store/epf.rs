//! EPF contribution operations

use chrono::NaiveDate;

use super::RestStore;
use crate::error::Result;
use crate::models::{EpfContribution, NewEpfContribution};

const TABLE: &str = "epf_contributions";

impl RestStore {
    /// All contributions, newest first
    pub async fn list_epf_contributions(&self) -> Result<Vec<EpfContribution>> {
        self.select(TABLE, &[("order", "date.desc".to_string())])
            .await
    }

    /// Contributions dated within `[from, to]`, newest first
    pub async fn list_epf_contributions_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EpfContribution>> {
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

    pub async fn add_epf_contribution(
        &self,
        row: &NewEpfContribution,
    ) -> Result<EpfContribution> {
        self.insert(TABLE, row).await
    }
}
