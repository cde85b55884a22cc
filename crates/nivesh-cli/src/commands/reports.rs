//! Report command implementations

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};

use nivesh_core::{reports, Month};

use super::{format_amount, Ctx};

/// Resolve a period string to (from_date, to_date) relative to today
pub fn resolve_period(period: &str) -> Result<(NaiveDate, NaiveDate)> {
    resolve_period_from(Utc::now().date_naive(), period)
}

/// Pure variant of `resolve_period` for a fixed reference date
pub fn resolve_period_from(today: NaiveDate, period: &str) -> Result<(NaiveDate, NaiveDate)> {
    let this_month = Month::from_date(today);
    match period.to_lowercase().as_str() {
        "this-month" => Ok((this_month.first_day(), today)),
        "last-month" => {
            let last = this_month.prev();
            Ok((last.first_day(), last.last_day()))
        }
        "this-year" => {
            let from = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                .expect("January 1st always exists");
            Ok((from, today))
        }
        "last-12-months" => {
            let mut from = this_month;
            for _ in 0..11 {
                from = from.prev();
            }
            Ok((from.first_day(), today))
        }
        "all" => {
            let from = NaiveDate::from_ymd_opt(2000, 1, 1)
                .expect("epoch start always exists");
            Ok((from, today))
        }
        _ => anyhow::bail!(
            "Unknown period: {}. Available: this-month, last-month, this-year, last-12-months, all",
            period
        ),
    }
}

pub async fn cmd_report_net_worth(json: bool) -> Result<()> {
    let ctx = Ctx::open().await?;
    let contributions = ctx.store.list_epf_contributions().await?;
    let investments = ctx.store.list_investments().await?;
    let banks = ctx.store.list_bank_accounts().await?;

    let through = Month::from_date(Utc::now().date_naive());
    let series = reports::net_worth_series(&contributions, &investments, &banks, through);

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!();
    println!("📈 Net Worth");
    println!(
        "   {:7} │ {:>14} │ {:>14} │ {:>14} │ {:>14}",
        "Month", "EPF", "Investments", "Banks", "Total"
    );
    println!("   ────────┼────────────────┼────────────────┼────────────────┼────────────────");
    let currency = &ctx.config.currency;
    for point in &series {
        println!(
            "   {:7} │ {:>14} │ {:>14} │ {:>14} │ {:>14}",
            point.month.to_string(),
            format_amount(currency, point.epf_total),
            format_amount(currency, point.investment_total),
            format_amount(currency, point.bank_total),
            format_amount(currency, point.total)
        );
    }
    Ok(())
}

pub async fn cmd_report_savings(period: &str, json: bool) -> Result<()> {
    let ctx = Ctx::open().await?;
    let (from, to) = resolve_period(period)?;
    let salaries = ctx.store.list_salary_records_between(from, to).await?;
    let expenses = ctx.store.list_expenses_between(from, to).await?;

    let months = reports::savings_by_month(
        &salaries,
        &expenses,
        Month::from_date(from),
        Month::from_date(to),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&months)?);
        return Ok(());
    }

    println!();
    println!("🪙 Savings Rate ({} to {})", from, to);
    println!(
        "   {:7} │ {:>14} │ {:>14} │ {:>8}",
        "Month", "Income", "Expenses", "Rate"
    );
    println!("   ────────┼────────────────┼────────────────┼──────────");
    let currency = &ctx.config.currency;
    for month in &months {
        let rate = month
            .rate
            .map(|r| format!("{:.1}%", r * 100.0))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "   {:7} │ {:>14} │ {:>14} │ {:>8}",
            month.month.to_string(),
            format_amount(currency, month.income),
            format_amount(currency, month.expenses),
            rate
        );
    }

    if let Some(overall) = reports::savings_rate(&salaries, &expenses, from, to) {
        println!();
        println!("   Overall: {:.1}%", overall * 100.0);
    }
    Ok(())
}

pub async fn cmd_report_categories(period: &str, json: bool) -> Result<()> {
    let ctx = Ctx::open().await?;
    let (from, to) = resolve_period(period)?;
    let expenses = ctx.store.list_expenses_between(from, to).await?;

    let summary = reports::category_breakdown(&expenses, from, to);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending by Category ({} to {})", from, to);
    if summary.categories.is_empty() {
        println!("   No spending found in this period.");
        return Ok(());
    }

    println!("   Total: {}", format_amount(&ctx.config.currency, summary.total));
    println!();
    println!(
        "   {:15} │ {:>14} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ────────────────┼────────────────┼────────┼───────");
    for category in &summary.categories {
        println!(
            "   {:15} │ {:>14} │ {:>5.1}% │ {:>5}",
            super::truncate(&category.category, 15),
            format_amount(&ctx.config.currency, category.amount),
            category.percentage,
            category.count
        );
    }
    Ok(())
}

pub async fn cmd_report_yoy(year: Option<i32>, json: bool) -> Result<()> {
    let ctx = Ctx::open().await?;
    let year = year.unwrap_or_else(|| Utc::now().date_naive().year());

    // Need both years of expenses
    let from = NaiveDate::from_ymd_opt(year - 1, 1, 1).expect("January 1st always exists");
    let to = NaiveDate::from_ymd_opt(year, 12, 31).expect("December 31st always exists");
    let expenses = ctx.store.list_expenses_between(from, to).await?;

    let comparison = reports::year_over_year(&expenses, year);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!();
    println!("📅 Year over Year — {} vs {}", year, year - 1);
    println!(
        "   {:>5} │ {:>14} │ {:>14} │ {:>8}",
        "Month", year, year - 1, "Change"
    );
    println!("   ──────┼────────────────┼────────────────┼──────────");
    let currency = &ctx.config.currency;
    for month in &comparison.months {
        let change = month
            .change_pct
            .map(|p| format!("{:+.1}%", p))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "   {:>5} │ {:>14} │ {:>14} │ {:>8}",
            month.month,
            format_amount(currency, month.current),
            format_amount(currency, month.previous),
            change
        );
    }
    println!();
    println!(
        "   Totals: {} vs {}",
        format_amount(currency, comparison.current_total),
        format_amount(currency, comparison.previous_total)
    );
    Ok(())
}
