//! SIP plan operations
//!
//! Plans are append-only: amount changes go through `supersede_sip_plan`,
//! which closes the old row and inserts a replacement effective next month.
//! History stays reconstructable from the effective date ranges.

use chrono::NaiveDate;
use serde_json::json;

use super::RestStore;
use crate::error::Result;
use crate::models::{NewSipPlan, SipPlan};
use crate::period::Month;

const TABLE: &str = "sip_plans";

impl RestStore {
    /// All plans (active and closed), oldest first
    pub async fn list_sip_plans(&self) -> Result<Vec<SipPlan>> {
        self.select(TABLE, &[("order", "start_date.asc".to_string())])
            .await
    }

    pub async fn add_sip_plan(&self, row: &NewSipPlan) -> Result<SipPlan> {
        self.insert(TABLE, row).await
    }

    /// Close a plan by setting its end date
    pub async fn close_sip_plan(&self, id: i64, end_date: NaiveDate) -> Result<()> {
        self.update(TABLE, id, &json!({ "end_date": end_date }))
            .await
    }

    /// Replace a plan's amount without mutating history: the old row ends
    /// with the current month, the new row starts next month.
    pub async fn supersede_sip_plan(
        &self,
        plan: &SipPlan,
        new_amount: f64,
        today: NaiveDate,
    ) -> Result<SipPlan> {
        let current = Month::from_date(today);
        self.close_sip_plan(plan.id, current.last_day()).await?;
        self.add_sip_plan(&NewSipPlan {
            user_id: plan.user_id.clone(),
            fund_name: plan.fund_name.clone(),
            amount: new_amount,
            start_date: current.next().first_day(),
            end_date: None,
        })
        .await
    }
}
