//! Derived summaries
//!
//! All report computation happens client-side over rows fetched for the
//! session; the backend only filters and orders. Each function here is pure,
//! so the reports are exactly as fresh (or stale) as the rows passed in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BankAccount, EpfContribution, Expense, Investment, SalaryRecord};
use crate::period::Month;

/// One month of the net worth series
#[derive(Debug, Clone, Serialize)]
pub struct NetWorthPoint {
    pub month: Month,
    /// Cumulative EPF contributions through this month
    pub epf_total: f64,
    /// Cumulative investments through this month (skip markers are zero)
    pub investment_total: f64,
    /// Current total bank balance (the store keeps no balance history)
    pub bank_total: f64,
    pub total: f64,
}

/// Monthly net worth from the earliest recorded entry through `through`
pub fn net_worth_series(
    contributions: &[EpfContribution],
    investments: &[Investment],
    banks: &[BankAccount],
    through: Month,
) -> Vec<NetWorthPoint> {
    let bank_total: f64 = banks.iter().map(|b| b.balance).sum();

    let mut start = contributions
        .iter()
        .map(|c| c.date)
        .chain(investments.iter().map(|i| i.date))
        .min()
        .map(Month::from_date)
        .unwrap_or(through);
    if start > through {
        start = through;
    }

    let mut points = Vec::new();
    let mut epf_total = 0.0;
    let mut investment_total = 0.0;
    let mut month = start;
    loop {
        epf_total += contributions
            .iter()
            .filter(|c| month.contains(c.date))
            .map(|c| c.amount)
            .sum::<f64>();
        investment_total += investments
            .iter()
            .filter(|i| month.contains(i.date))
            .map(|i| i.amount)
            .sum::<f64>();
        points.push(NetWorthPoint {
            month,
            epf_total,
            investment_total,
            bank_total,
            total: epf_total + investment_total + bank_total,
        });
        if month == through {
            break;
        }
        month = month.next();
    }
    points
}

/// One month of income vs expenses
#[derive(Debug, Clone, Serialize)]
pub struct SavingsMonth {
    pub month: Month,
    pub income: f64,
    pub expenses: f64,
    /// None when the month has no recorded income
    pub rate: Option<f64>,
}

/// Per-month savings rate over `[from, to]` months inclusive
pub fn savings_by_month(
    salaries: &[SalaryRecord],
    expenses: &[Expense],
    from: Month,
    to: Month,
) -> Vec<SavingsMonth> {
    let mut months = Vec::new();
    let mut month = from;
    while month <= to {
        let income: f64 = salaries
            .iter()
            .filter(|s| month.contains(s.date))
            .map(|s| s.amount)
            .sum();
        let spent: f64 = expenses
            .iter()
            .filter(|e| month.contains(e.date))
            .map(|e| e.amount)
            .sum();
        let rate = if income > 0.0 {
            Some((income - spent) / income)
        } else {
            None
        };
        months.push(SavingsMonth {
            month,
            income,
            expenses: spent,
            rate,
        });
        month = month.next();
    }
    months
}

/// Aggregate savings rate over a date range; None when no income recorded
pub fn savings_rate(
    salaries: &[SalaryRecord],
    expenses: &[Expense],
    from: NaiveDate,
    to: NaiveDate,
) -> Option<f64> {
    let income: f64 = salaries
        .iter()
        .filter(|s| s.date >= from && s.date <= to)
        .map(|s| s.amount)
        .sum();
    if income <= 0.0 {
        return None;
    }
    let spent: f64 = expenses
        .iter()
        .filter(|e| e.date >= from && e.date <= to)
        .map(|e| e.amount)
        .sum();
    Some((income - spent) / income)
}

/// Spending in one category over a period
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub count: usize,
}

/// Expense breakdown by category over a period
#[derive(Debug, Clone, Serialize)]
pub struct SpendingSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: f64,
    /// Categories sorted by amount, largest first
    pub categories: Vec<CategorySpending>,
}

pub fn category_breakdown(expenses: &[Expense], from: NaiveDate, to: NaiveDate) -> SpendingSummary {
    let mut by_category: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    let mut total = 0.0;
    for expense in expenses.iter().filter(|e| e.date >= from && e.date <= to) {
        let entry = by_category.entry(expense.category.as_str()).or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
        total += expense.amount;
    }

    let mut categories: Vec<CategorySpending> = by_category
        .into_iter()
        .map(|(category, (amount, count))| CategorySpending {
            category: category.to_string(),
            amount,
            percentage: if total > 0.0 {
                (amount / total) * 100.0
            } else {
                0.0
            },
            count,
        })
        .collect();
    categories.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    SpendingSummary {
        from,
        to,
        total,
        categories,
    }
}

/// One calendar month compared against the same month a year earlier
#[derive(Debug, Clone, Serialize)]
pub struct YoyMonth {
    /// Calendar month number, 1-12
    pub month: u32,
    pub current: f64,
    pub previous: f64,
    /// None when the previous year has nothing to compare against
    pub change_pct: Option<f64>,
}

/// Year-over-year expense comparison
#[derive(Debug, Clone, Serialize)]
pub struct YoyComparison {
    pub year: i32,
    pub months: Vec<YoyMonth>,
    pub current_total: f64,
    pub previous_total: f64,
}

pub fn year_over_year(expenses: &[Expense], year: i32) -> YoyComparison {
    let month_total = |y: i32, m: u32| -> f64 {
        expenses
            .iter()
            .filter(|e| {
                let em = Month::from_date(e.date);
                em.year() == y && em.month() == m
            })
            .map(|e| e.amount)
            .sum()
    };

    let mut months = Vec::with_capacity(12);
    let mut current_total = 0.0;
    let mut previous_total = 0.0;
    for m in 1..=12 {
        let current = month_total(year, m);
        let previous = month_total(year - 1, m);
        current_total += current;
        previous_total += previous;
        let change_pct = if previous > 0.0 {
            Some(((current - previous) / previous) * 100.0)
        } else {
            None
        };
        months.push(YoyMonth {
            month: m,
            current,
            previous,
            change_pct,
        });
    }

    YoyComparison {
        year,
        months,
        current_total,
        previous_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvestmentKind;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn expense(category: &str, amount: f64, date: NaiveDate) -> Expense {
        Expense {
            id: 0,
            user_id: "u1".to_string(),
            category: category.to_string(),
            description: None,
            amount,
            date,
            created_at: Utc::now(),
        }
    }

    fn salary(amount: f64, date: NaiveDate) -> SalaryRecord {
        SalaryRecord {
            id: 0,
            user_id: "u1".to_string(),
            amount,
            date,
            source: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn contribution(amount: f64, date: NaiveDate) -> EpfContribution {
        EpfContribution {
            id: 0,
            user_id: "u1".to_string(),
            amount,
            date,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn investment(amount: f64, date: NaiveDate) -> Investment {
        Investment {
            id: 0,
            user_id: "u1".to_string(),
            sip_plan_id: None,
            kind: InvestmentKind::Sip,
            name: "Fund".to_string(),
            amount,
            date,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn bank(balance: f64) -> BankAccount {
        BankAccount {
            id: 0,
            user_id: "u1".to_string(),
            name: "Checking".to_string(),
            balance,
            as_of: d(2026, 8, 1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_net_worth_series_accumulates() {
        let contributions = [contribution(1800.0, d(2026, 6, 5)), contribution(1800.0, d(2026, 7, 5))];
        let investments = [investment(5000.0, d(2026, 7, 25))];
        let banks = [bank(10000.0)];
        let series = net_worth_series(
            &contributions,
            &investments,
            &banks,
            Month::from_date(d(2026, 8, 1)),
        );

        assert_eq!(series.len(), 3); // Jun, Jul, Aug
        assert_eq!(series[0].epf_total, 1800.0);
        assert_eq!(series[0].investment_total, 0.0);
        assert_eq!(series[1].epf_total, 3600.0);
        assert_eq!(series[1].investment_total, 5000.0);
        // Nothing new in August, totals carry forward
        assert_eq!(series[2].total, 3600.0 + 5000.0 + 10000.0);
        // Bank balance is flat across the series
        assert!(series.iter().all(|p| p.bank_total == 10000.0));
    }

    #[test]
    fn test_net_worth_series_no_rows() {
        let through = Month::from_date(d(2026, 8, 1));
        let series = net_worth_series(&[], &[], &[bank(500.0)], through);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total, 500.0);
    }

    #[test]
    fn test_savings_by_month() {
        let salaries = [salary(100000.0, d(2026, 7, 1))];
        let expenses = [expense("Food", 30000.0, d(2026, 7, 10)), expense("Rent", 25000.0, d(2026, 8, 1))];
        let months = savings_by_month(
            &salaries,
            &expenses,
            Month::from_date(d(2026, 7, 1)),
            Month::from_date(d(2026, 8, 1)),
        );

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].income, 100000.0);
        assert_eq!(months[0].expenses, 30000.0);
        assert_eq!(months[0].rate, Some(0.7));
        // August has expenses but no income: no rate
        assert_eq!(months[1].rate, None);
    }

    #[test]
    fn test_savings_rate_aggregate() {
        let salaries = [salary(100000.0, d(2026, 7, 1)), salary(100000.0, d(2026, 8, 1))];
        let expenses = [expense("Food", 50000.0, d(2026, 7, 10))];
        let rate = savings_rate(&salaries, &expenses, d(2026, 7, 1), d(2026, 8, 31));
        assert_eq!(rate, Some(0.75));

        assert_eq!(savings_rate(&[], &expenses, d(2026, 7, 1), d(2026, 8, 31)), None);
    }

    #[test]
    fn test_category_breakdown() {
        let expenses = [
            expense("Food", 3000.0, d(2026, 8, 1)),
            expense("Food", 1000.0, d(2026, 8, 15)),
            expense("Transport", 1000.0, d(2026, 8, 10)),
            // Outside the period, ignored
            expense("Food", 999.0, d(2026, 7, 31)),
        ];
        let summary = category_breakdown(&expenses, d(2026, 8, 1), d(2026, 8, 31));

        assert_eq!(summary.total, 5000.0);
        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.categories[0].category, "Food");
        assert_eq!(summary.categories[0].amount, 4000.0);
        assert_eq!(summary.categories[0].percentage, 80.0);
        assert_eq!(summary.categories[0].count, 2);
        assert_eq!(summary.categories[1].category, "Transport");
    }

    #[test]
    fn test_category_breakdown_empty() {
        let summary = category_breakdown(&[], d(2026, 8, 1), d(2026, 8, 31));
        assert_eq!(summary.total, 0.0);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn test_year_over_year() {
        let expenses = [
            expense("Food", 1000.0, d(2025, 3, 10)),
            expense("Food", 1500.0, d(2026, 3, 10)),
            expense("Rent", 2000.0, d(2026, 5, 1)),
        ];
        let yoy = year_over_year(&expenses, 2026);

        assert_eq!(yoy.months.len(), 12);
        let march = &yoy.months[2];
        assert_eq!(march.current, 1500.0);
        assert_eq!(march.previous, 1000.0);
        assert_eq!(march.change_pct, Some(50.0));
        // May has no prior-year data to compare against
        let may = &yoy.months[4];
        assert_eq!(may.change_pct, None);
        assert_eq!(yoy.current_total, 3500.0);
        assert_eq!(yoy.previous_total, 1000.0);
    }
}
