//! Salary record operations

use chrono::NaiveDate;

use super::RestStore;
use crate::error::Result;
use crate::models::{NewSalaryRecord, SalaryRecord};

const TABLE: &str = "salary_records";

impl RestStore {
    /// All salary credits, newest first
    pub async fn list_salary_records(&self) -> Result<Vec<SalaryRecord>> {
        self.select(TABLE, &[("order", "date.desc".to_string())])
            .await
    }

    /// Salary credits dated within `[from, to]`, newest first
    pub async fn list_salary_records_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SalaryRecord>> {
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

    pub async fn add_salary_record(&self, row: &NewSalaryRecord) -> Result<SalaryRecord> {
        self.insert(TABLE, row).await
    }
}
