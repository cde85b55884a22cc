//! Bank account operations

use chrono::NaiveDate;
use serde_json::json;

use super::RestStore;
use crate::error::Result;
use crate::models::{BankAccount, NewBankAccount};

const TABLE: &str = "bank_accounts";

impl RestStore {
    pub async fn list_bank_accounts(&self) -> Result<Vec<BankAccount>> {
        self.select(TABLE, &[("order", "name.asc".to_string())])
            .await
    }

    pub async fn add_bank_account(&self, row: &NewBankAccount) -> Result<BankAccount> {
        self.insert(TABLE, row).await
    }

    /// Overwrite an account's balance in place
    pub async fn set_bank_balance(
        &self,
        id: i64,
        balance: f64,
        as_of: NaiveDate,
    ) -> Result<()> {
        self.update(TABLE, id, &json!({ "balance": balance, "as_of": as_of }))
            .await
    }
}
