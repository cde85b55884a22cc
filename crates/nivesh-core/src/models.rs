//! Domain models for Nivesh
//!
//! Every entity is a row owned by the hosted backend; the application only
//! holds transient in-memory copies fetched per session. `New*` structs are
//! the insert payloads (no id, no server-assigned timestamp).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::period::Month;

/// Note marking an entry the reconciler inserted automatically
pub const AUTO_NOTE: &str = "auto";

/// Note marking a deliberate zero-amount skip for a month
pub const SKIP_NOTE: &str = "skipped";

/// A monthly EPF (provident fund) contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpfContribution {
    pub id: i64,
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEpfContribution {
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// A systematic investment plan
///
/// Plans are append-only: an amount change closes the old row (sets its
/// `end_date`) and inserts a new row effective the following month, so the
/// contribution history stays reconstructable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipPlan {
    pub id: i64,
    pub user_id: String,
    pub fund_name: String,
    pub amount: f64,
    pub start_date: NaiveDate,
    /// None = open-ended
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSipPlan {
    pub user_id: String,
    pub fund_name: String,
    pub amount: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl SipPlan {
    /// Whether this plan is active in the given month:
    /// started on or before it, and not ended before it.
    pub fn is_active_in(&self, month: Month) -> bool {
        if Month::from_date(self.start_date) > month {
            return false;
        }
        match self.end_date {
            None => true,
            Some(end) => Month::from_date(end) >= month,
        }
    }
}

/// How an investment entry was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentKind {
    /// Monthly entry derived from a SIP plan
    Sip,
    /// One-off entry recorded by hand
    Manual,
}

impl InvestmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::Manual => "manual",
        }
    }
}

impl std::str::FromStr for InvestmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sip" => Ok(Self::Sip),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("Unknown investment kind: {}", s)),
        }
    }
}

impl std::fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An investment entry (SIP-derived or manual)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub user_id: String,
    /// Weak back-reference: deleting the plan does not cascade here
    pub sip_plan_id: Option<i64>,
    pub kind: InvestmentKind,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewInvestment {
    pub user_id: String,
    pub sip_plan_id: Option<i64>,
    pub kind: InvestmentKind,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl Investment {
    /// A zero-amount entry recording a deliberate "skip this month".
    /// Skip markers satisfy the month for reconciliation purposes.
    pub fn is_skip_marker(&self) -> bool {
        self.amount == 0.0 && self.notes.as_deref() == Some(SKIP_NOTE)
    }

    /// Whether this entry satisfies the given plan for the given month
    /// (skip markers included).
    pub fn covers(&self, plan_id: i64, month: Month) -> bool {
        self.sip_plan_id == Some(plan_id) && month.contains(self.date)
    }
}

/// A categorized expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewExpense {
    pub user_id: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A bank account with its latest known balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub balance: f64,
    /// Date the balance was last recorded
    pub as_of: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBankAccount {
    pub user_id: String,
    pub name: String,
    pub balance: f64,
    pub as_of: NaiveDate,
}

/// A salary credit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub id: i64,
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSalaryRecord {
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub source: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn plan(start: NaiveDate, end: Option<NaiveDate>) -> SipPlan {
        SipPlan {
            id: 1,
            user_id: "u1".to_string(),
            fund_name: "Index Fund".to_string(),
            amount: 5000.0,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_investment_kind_roundtrip() {
        assert_eq!("sip".parse::<InvestmentKind>().unwrap(), InvestmentKind::Sip);
        assert_eq!(
            "Manual".parse::<InvestmentKind>().unwrap(),
            InvestmentKind::Manual
        );
        assert!("stocks".parse::<InvestmentKind>().is_err());
        assert_eq!(InvestmentKind::Sip.to_string(), "sip");
    }

    #[test]
    fn test_plan_active_open_ended() {
        let p = plan(d(2026, 3, 15), None);
        assert!(!p.is_active_in(Month::from_date(d(2026, 2, 28))));
        // Active from the start month itself, even mid-month
        assert!(p.is_active_in(Month::from_date(d(2026, 3, 1))));
        assert!(p.is_active_in(Month::from_date(d(2027, 1, 1))));
    }

    #[test]
    fn test_plan_active_with_end_date() {
        let p = plan(d(2026, 1, 1), Some(d(2026, 6, 30)));
        assert!(p.is_active_in(Month::from_date(d(2026, 6, 25))));
        assert!(!p.is_active_in(Month::from_date(d(2026, 7, 1))));
    }

    #[test]
    fn test_skip_marker() {
        let inv = Investment {
            id: 1,
            user_id: "u1".to_string(),
            sip_plan_id: Some(7),
            kind: InvestmentKind::Sip,
            name: "Index Fund".to_string(),
            amount: 0.0,
            date: d(2026, 8, 7),
            notes: Some(SKIP_NOTE.to_string()),
            created_at: Utc::now(),
        };
        assert!(inv.is_skip_marker());
        assert!(inv.covers(7, Month::from_date(d(2026, 8, 1))));
        assert!(!inv.covers(8, Month::from_date(d(2026, 8, 1))));
        assert!(!inv.covers(7, Month::from_date(d(2026, 9, 1))));
    }
}
