//! In-memory store for testing
//!
//! Implements the reconciler's store trait over plain vectors, with
//! switches to simulate backend read/write failures. Useful for unit and
//! integration tests without a running backend.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::models::{
    EpfContribution, Investment, InvestmentKind, NewEpfContribution, NewInvestment, SipPlan,
};
use crate::period::Month;
use crate::reconcile::ContributionStore;

const TEST_USER: &str = "user-1";

#[derive(Default)]
struct Inner {
    next_id: i64,
    contributions: Vec<EpfContribution>,
    plans: Vec<SipPlan>,
    investments: Vec<Investment>,
    fail_reads: bool,
    fail_writes: bool,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory mock store
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

fn backend_down() -> Error {
    Error::Backend {
        status: 503,
        message: "backend unavailable".to_string(),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    /// Make subsequent reads fail with a backend error
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make subsequent writes fail with a backend error
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn seed_plan(
        &self,
        fund_name: &str,
        amount: f64,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> i64 {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.plans.push(SipPlan {
            id,
            user_id: TEST_USER.to_string(),
            fund_name: fund_name.to_string(),
            amount,
            start_date,
            end_date,
        });
        id
    }

    pub fn seed_contribution(&self, date: NaiveDate, amount: f64) -> i64 {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.contributions.push(EpfContribution {
            id,
            user_id: TEST_USER.to_string(),
            amount,
            date,
            notes: None,
            created_at: Utc::now(),
        });
        id
    }

    pub fn seed_investment(
        &self,
        sip_plan_id: Option<i64>,
        date: NaiveDate,
        amount: f64,
        notes: Option<&str>,
    ) -> i64 {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.investments.push(Investment {
            id,
            user_id: TEST_USER.to_string(),
            sip_plan_id,
            kind: InvestmentKind::Sip,
            name: "Seeded Fund".to_string(),
            amount,
            date,
            notes: notes.map(str::to_string),
            created_at: Utc::now(),
        });
        id
    }

    /// Snapshot of all stored contributions
    pub fn contributions(&self) -> Vec<EpfContribution> {
        self.lock().contributions.clone()
    }

    /// Snapshot of all stored investments
    pub fn investments(&self) -> Vec<Investment> {
        self.lock().investments.clone()
    }
}

#[async_trait]
impl ContributionStore for MemoryStore {
    async fn epf_contributions_in(&self, month: Month) -> Result<Vec<EpfContribution>> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(backend_down());
        }
        Ok(inner
            .contributions
            .iter()
            .filter(|c| month.contains(c.date))
            .cloned()
            .collect())
    }

    async fn insert_epf_contribution(
        &self,
        row: &NewEpfContribution,
    ) -> Result<EpfContribution> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(backend_down());
        }
        let id = inner.next_id();
        let stored = EpfContribution {
            id,
            user_id: row.user_id.clone(),
            amount: row.amount,
            date: row.date,
            notes: row.notes.clone(),
            created_at: Utc::now(),
        };
        inner.contributions.push(stored.clone());
        Ok(stored)
    }

    async fn sip_plans(&self) -> Result<Vec<SipPlan>> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(backend_down());
        }
        Ok(inner.plans.clone())
    }

    async fn investments_in(&self, month: Month) -> Result<Vec<Investment>> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(backend_down());
        }
        Ok(inner
            .investments
            .iter()
            .filter(|i| month.contains(i.date))
            .cloned()
            .collect())
    }

    async fn insert_investment(&self, row: &NewInvestment) -> Result<Investment> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(backend_down());
        }
        let id = inner.next_id();
        let stored = Investment {
            id,
            user_id: row.user_id.clone(),
            sip_plan_id: row.sip_plan_id,
            kind: row.kind,
            name: row.name.clone(),
            amount: row.amount,
            date: row.date,
            notes: row.notes.clone(),
            created_at: Utc::now(),
        };
        inner.investments.push(stored.clone());
        Ok(stored)
    }
}
