//! Managed data store client
//!
//! The backend is a hosted relational store exposed over a REST row API
//! (equality/range filters, ordering, insert, update, delete). Row-level
//! security on the backend scopes every request to the signed-in user, so
//! queries here filter only for correctness, never for isolation.
//!
//! Entity operations are organized one module per entity:
//! - `banks` - Bank account operations
//! - `epf` - EPF contribution operations
//! - `expenses` - Expense operations
//! - `investments` - Investment operations
//! - `salary` - Salary record operations
//! - `sips` - SIP plan operations
//!
//! `memory` holds the in-memory store used by tests.

pub mod banks;
pub mod epf;
pub mod expenses;
pub mod investments;
pub mod memory;
pub mod salary;
pub mod sips;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{EpfContribution, Investment, NewEpfContribution, NewInvestment, SipPlan};
use crate::period::Month;
use crate::reconcile::ContributionStore;

pub use memory::MemoryStore;

/// Client for the backend's REST row API
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, access_token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Fetch rows matching the given filter/order query pairs
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        debug!("select from {} with {} filters", table, query.len());
        let response = self
            .http
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .query(&[("select", "*")])
            .query(query)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Insert one row and return the stored representation
    pub(crate) async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let mut rows: Vec<T> = ensure_success(response).await?.json().await?;
        rows.pop()
            .ok_or_else(|| Error::InvalidData(format!("Insert into {} returned no rows", table)))
    }

    /// Patch the row with the given id
    pub(crate) async fn update<B: Serialize>(&self, table: &str, id: i64, patch: &B) -> Result<()> {
        let response = self
            .http
            .patch(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .query(&[("id", format!("eq.{}", id))])
            .json(patch)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Delete the row with the given id
    pub(crate) async fn delete(&self, table: &str, id: i64) -> Result<()> {
        let response = self
            .http
            .delete(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Map non-2xx responses to a backend error carrying status and body
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(Error::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ContributionStore for RestStore {
    async fn epf_contributions_in(&self, month: Month) -> Result<Vec<EpfContribution>> {
        self.list_epf_contributions_between(month.first_day(), month.last_day())
            .await
    }

    async fn insert_epf_contribution(
        &self,
        row: &NewEpfContribution,
    ) -> Result<EpfContribution> {
        self.add_epf_contribution(row).await
    }

    async fn sip_plans(&self) -> Result<Vec<SipPlan>> {
        self.list_sip_plans().await
    }

    async fn investments_in(&self, month: Month) -> Result<Vec<Investment>> {
        self.list_investments_between(month.first_day(), month.last_day())
            .await
    }

    async fn insert_investment(&self, row: &NewInvestment) -> Result<Investment> {
        self.add_investment(row).await
    }
}
