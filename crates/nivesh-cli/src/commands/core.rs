//! Status and dashboard commands

use anyhow::Result;
use chrono::Utc;
use tracing::warn;

use nivesh_core::auth::default_session_path;
use nivesh_core::reconcile::{self, epf_status, sip_status};
use nivesh_core::{reports, Config, Month, Session};

use super::{format_amount, Ctx};

/// Show config and session status without touching the backend
pub fn cmd_status() -> Result<()> {
    println!();
    println!("🔎 Nivesh Status");
    println!("   ─────────────────────────────");

    match Config::load() {
        Ok(config) => println!("   Backend: {}", config.backend_url),
        Err(e) => println!("   Backend: not configured ({})", e),
    }

    let path = default_session_path()?;
    match Session::load(&path)? {
        Some(session) => {
            println!(
                "   Signed in: {} ({})",
                session.email.as_deref().unwrap_or("unknown"),
                session.user_id
            );
            println!(
                "   Token: {}",
                if session.is_expired() {
                    "expired (will refresh on next command)"
                } else {
                    "valid"
                }
            );
            match session.last_reconciled {
                Some(month) => println!("   Last reconciled: {}", month),
                None => println!("   Last reconciled: never"),
            }
        }
        None => println!("   Signed in: no (run `nivesh login`)"),
    }

    Ok(())
}

/// Dashboard summary. Runs the reconciler first (once per session per
/// month), then renders; a failed read degrades that section to empty
/// rather than blocking the rest.
pub async fn cmd_dashboard() -> Result<()> {
    let mut ctx = Ctx::open().await?;
    let today = Utc::now().date_naive();
    let month = Month::from_date(today);

    let outcome = reconcile::run(
        &ctx.store,
        &ctx.session.user_id,
        today,
        ctx.session.last_reconciled,
        ctx.config.epf_monthly_amount,
    )
    .await;
    if outcome.checked {
        ctx.session.last_reconciled = Some(month);
        ctx.save_session()?;
    }
    let currency = ctx.config.currency.clone();
    if let Some(epf) = &outcome.epf {
        println!(
            "📌 Added this month's EPF contribution: {}",
            format_amount(&currency, epf.amount)
        );
    }
    for investment in &outcome.investments {
        println!(
            "📌 Added this month's SIP investment: {} ({})",
            investment.name,
            format_amount(&currency, investment.amount)
        );
    }

    let contributions = ctx.store.list_epf_contributions().await.unwrap_or_else(|e| {
        warn!("Failed to load EPF contributions: {}", e);
        Vec::new()
    });
    let investments = ctx.store.list_investments().await.unwrap_or_else(|e| {
        warn!("Failed to load investments: {}", e);
        Vec::new()
    });
    let banks = ctx.store.list_bank_accounts().await.unwrap_or_else(|e| {
        warn!("Failed to load bank accounts: {}", e);
        Vec::new()
    });
    let plans = ctx.store.list_sip_plans().await.unwrap_or_else(|e| {
        warn!("Failed to load SIP plans: {}", e);
        Vec::new()
    });
    let expenses = ctx
        .store
        .list_expenses_between(month.first_day(), month.last_day())
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load expenses: {}", e);
            Vec::new()
        });
    let salaries = ctx
        .store
        .list_salary_records_between(month.first_day(), month.last_day())
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load salary records: {}", e);
            Vec::new()
        });

    let series = reports::net_worth_series(&contributions, &investments, &banks, month);
    let spent: f64 = expenses.iter().map(|e| e.amount).sum();
    let income: f64 = salaries.iter().map(|s| s.amount).sum();

    println!();
    println!("💰 Dashboard — {}", month);
    println!("   ─────────────────────────────────────────────");
    if let Some(point) = series.last() {
        println!("   Net worth: {}", format_amount(&currency, point.total));
        println!(
            "      EPF {} · Investments {} · Banks {}",
            format_amount(&currency, point.epf_total),
            format_amount(&currency, point.investment_total),
            format_amount(&currency, point.bank_total)
        );
    }
    println!("   This month:");
    println!("      Income:  {}", format_amount(&currency, income));
    println!("      Spent:   {}", format_amount(&currency, spent));
    if income > 0.0 {
        println!(
            "      Savings: {:.1}%",
            ((income - spent) / income) * 100.0
        );
    }

    println!("   Obligations:");
    println!("      EPF: {}", epf_status(today, &contributions));
    for plan in plans.iter().filter(|p| p.is_active_in(month)) {
        println!(
            "      SIP {}: {}",
            plan.fund_name,
            sip_status(today, plan, &investments)
        );
    }

    Ok(())
}
