//! Recurring-contribution reconciler
//!
//! Ensures the current calendar month has the entries the user's recurring
//! obligations call for: an EPF contribution once the 5th has passed, and one
//! SIP investment per active plan once the 25th has passed. Duplicate
//! prevention is a pure existence check over the month's rows — there is no
//! uniqueness backstop at the storage layer, so this is an at-least-once
//! guarantee: two concurrent sessions can both pass the check and both
//! insert.
//!
//! The decision is a pure function (`plan`) of today's date, the fetched
//! rows, and an explicit `last_reconciled` marker; `run` does the fetching
//! and inserting around it. `run` never returns an error: a backend failure
//! is logged and degrades to "nothing inserted" so the rest of the dashboard
//! still renders.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, error, info};

use crate::error::Result;
use crate::models::{
    EpfContribution, Investment, InvestmentKind, NewEpfContribution, NewInvestment, SipPlan,
    AUTO_NOTE, SKIP_NOTE,
};
use crate::period::Month;

/// Day of month on/after which the EPF contribution is due
pub const EPF_TRIGGER_DAY: u32 = 5;

/// Day of month on/after which SIP investments are due
pub const SIP_TRIGGER_DAY: u32 = 25;

/// Monthly EPF amount used when the config never set one
pub const DEFAULT_EPF_AMOUNT: f64 = 1800.0;

/// Store operations the reconciler needs.
///
/// Implemented by the REST row store in production and by the in-memory
/// store in tests.
#[async_trait]
pub trait ContributionStore {
    /// EPF contributions dated within the given month
    async fn epf_contributions_in(&self, month: Month) -> Result<Vec<EpfContribution>>;

    async fn insert_epf_contribution(&self, row: &NewEpfContribution)
        -> Result<EpfContribution>;

    /// All of the user's SIP plans (active and closed)
    async fn sip_plans(&self) -> Result<Vec<SipPlan>>;

    /// Investment entries dated within the given month
    async fn investments_in(&self, month: Month) -> Result<Vec<Investment>>;

    async fn insert_investment(&self, row: &NewInvestment) -> Result<Investment>;
}

/// Per-month status of one recurring obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObligationStatus {
    /// Before the trigger day, nothing expected yet
    Pending,
    /// On/after the trigger day with no entry for the month
    Due,
    /// An entry (or skip marker) exists for the month
    Satisfied,
}

impl ObligationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Due => "due",
            Self::Satisfied => "satisfied",
        }
    }
}

impl std::fmt::Display for ObligationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of the month's EPF obligation
pub fn epf_status(today: NaiveDate, contributions: &[EpfContribution]) -> ObligationStatus {
    let month = Month::from_date(today);
    if contributions.iter().any(|c| month.contains(c.date)) {
        ObligationStatus::Satisfied
    } else if today.day() >= EPF_TRIGGER_DAY {
        ObligationStatus::Due
    } else {
        ObligationStatus::Pending
    }
}

/// Status of the month's obligation for one SIP plan
pub fn sip_status(
    today: NaiveDate,
    plan: &SipPlan,
    investments: &[Investment],
) -> ObligationStatus {
    let month = Month::from_date(today);
    if investments.iter().any(|i| i.covers(plan.id, month)) {
        ObligationStatus::Satisfied
    } else if today.day() >= SIP_TRIGGER_DAY {
        ObligationStatus::Due
    } else {
        ObligationStatus::Pending
    }
}

/// Rows the reconciler decided to insert
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    pub epf: Option<NewEpfContribution>,
    pub sips: Vec<NewInvestment>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.epf.is_none() && self.sips.is_empty()
    }
}

/// Decide what the current month is missing.
///
/// Pure function of its inputs; planning twice over the same state yields
/// the same plan, and planning after the planned rows exist yields nothing.
pub fn plan(
    user_id: &str,
    today: NaiveDate,
    last_reconciled: Option<Month>,
    epf_amount: f64,
    contributions: &[EpfContribution],
    plans: &[SipPlan],
    investments: &[Investment],
) -> ReconcilePlan {
    let month = Month::from_date(today);
    let mut result = ReconcilePlan::default();

    // Session guard: already checked for this month
    if last_reconciled == Some(month) {
        return result;
    }

    if today.day() >= EPF_TRIGGER_DAY && !contributions.iter().any(|c| month.contains(c.date)) {
        result.epf = Some(NewEpfContribution {
            user_id: user_id.to_string(),
            amount: epf_amount,
            date: month.day(EPF_TRIGGER_DAY),
            notes: Some(AUTO_NOTE.to_string()),
        });
    }

    if today.day() >= SIP_TRIGGER_DAY {
        for sip_plan in plans.iter().filter(|p| p.is_active_in(month)) {
            let covered = investments.iter().any(|i| i.covers(sip_plan.id, month));
            if !covered {
                result.sips.push(NewInvestment {
                    user_id: user_id.to_string(),
                    sip_plan_id: Some(sip_plan.id),
                    kind: InvestmentKind::Sip,
                    name: sip_plan.fund_name.clone(),
                    amount: sip_plan.amount,
                    date: month.day(SIP_TRIGGER_DAY),
                    notes: Some(AUTO_NOTE.to_string()),
                });
            }
        }
    }

    result
}

/// Rows actually inserted by a reconciliation run
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub epf: Option<EpfContribution>,
    pub investments: Vec<Investment>,
    /// Whether the existence checks completed. False means a read failed
    /// and the month is still unverified; callers should not advance their
    /// `last_reconciled` marker.
    pub checked: bool,
}

impl ReconcileOutcome {
    pub fn is_empty(&self) -> bool {
        self.epf.is_none() && self.investments.is_empty()
    }
}

/// Run one reconciliation pass: fetch the month's rows, plan, insert.
///
/// Never returns an error. A failed read aborts the pass with nothing
/// inserted; a failed individual insert is logged and skipped while the
/// remaining inserts proceed.
pub async fn run<S: ContributionStore>(
    store: &S,
    user_id: &str,
    today: NaiveDate,
    last_reconciled: Option<Month>,
    epf_amount: f64,
) -> ReconcileOutcome {
    let month = Month::from_date(today);
    let mut outcome = ReconcileOutcome::default();

    if last_reconciled == Some(month) {
        debug!("reconciliation already ran for {}, skipping", month);
        outcome.checked = true;
        return outcome;
    }

    let contributions = match store.epf_contributions_in(month).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Reconciler: failed to read EPF contributions: {}", e);
            return outcome;
        }
    };
    let plans = match store.sip_plans().await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Reconciler: failed to read SIP plans: {}", e);
            return outcome;
        }
    };
    let investments = match store.investments_in(month).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Reconciler: failed to read investments: {}", e);
            return outcome;
        }
    };
    outcome.checked = true;

    let plan = plan(
        user_id,
        today,
        last_reconciled,
        epf_amount,
        &contributions,
        &plans,
        &investments,
    );
    if plan.is_empty() {
        debug!("{} already satisfied, nothing to insert", month);
        return outcome;
    }

    if let Some(row) = plan.epf {
        match store.insert_epf_contribution(&row).await {
            Ok(inserted) => {
                info!(
                    "Reconciler: added EPF contribution of {} for {}",
                    inserted.amount, month
                );
                outcome.epf = Some(inserted);
            }
            Err(e) => error!("Reconciler: failed to insert EPF contribution: {}", e),
        }
    }

    for row in plan.sips {
        match store.insert_investment(&row).await {
            Ok(inserted) => {
                info!(
                    "Reconciler: added SIP investment {} ({}) for {}",
                    inserted.name, inserted.amount, month
                );
                outcome.investments.push(inserted);
            }
            Err(e) => error!("Reconciler: failed to insert SIP investment {}: {}", row.name, e),
        }
    }

    outcome
}

/// Record a deliberate "skip this month": insert a zero-amount marker for
/// every active plan that has no entry yet, pre-empting the day-25 insert.
///
/// Same failure handling as `run`: log and degrade, never raise.
pub async fn skip_month<S: ContributionStore>(
    store: &S,
    user_id: &str,
    today: NaiveDate,
) -> Vec<Investment> {
    let month = Month::from_date(today);
    let mut markers = Vec::new();

    let plans = match store.sip_plans().await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Skip: failed to read SIP plans: {}", e);
            return markers;
        }
    };
    let investments = match store.investments_in(month).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Skip: failed to read investments: {}", e);
            return markers;
        }
    };

    for sip_plan in plans.iter().filter(|p| p.is_active_in(month)) {
        if investments.iter().any(|i| i.covers(sip_plan.id, month)) {
            continue;
        }
        let marker = NewInvestment {
            user_id: user_id.to_string(),
            sip_plan_id: Some(sip_plan.id),
            kind: InvestmentKind::Sip,
            name: sip_plan.fund_name.clone(),
            amount: 0.0,
            date: today,
            notes: Some(SKIP_NOTE.to_string()),
        };
        match store.insert_investment(&marker).await {
            Ok(inserted) => {
                info!("Skipped {} for {}", inserted.name, month);
                markers.push(inserted);
            }
            Err(e) => error!("Skip: failed to insert marker for {}: {}", sip_plan.fund_name, e),
        }
    }

    markers
}
