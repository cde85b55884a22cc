//! SIP plan commands

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};

use nivesh_core::models::NewSipPlan;
use nivesh_core::Month;

use super::{format_amount, Ctx};

pub async fn cmd_sip_list() -> Result<()> {
    let ctx = Ctx::open().await?;
    let plans = ctx.store.list_sip_plans().await?;
    let month = Month::from_date(Utc::now().date_naive());

    println!();
    println!("📈 SIP Plans");
    if plans.is_empty() {
        println!("   No plans yet. Start one with `nivesh sip add`.");
        return Ok(());
    }

    println!(
        "   {:>5} │ {:25} │ {:>12} │ {:10} │ {:10} │ {}",
        "ID", "Fund", "Amount", "From", "Until", "State"
    );
    println!("   ──────┼───────────────────────────┼──────────────┼────────────┼────────────┼────────");
    for plan in &plans {
        println!(
            "   {:>5} │ {:25} │ {:>12} │ {:10} │ {:10} │ {}",
            plan.id,
            super::truncate(&plan.fund_name, 25),
            format_amount(&ctx.config.currency, plan.amount),
            plan.start_date.to_string(),
            plan.end_date.map(|d| d.to_string()).unwrap_or_else(|| "open".to_string()),
            if plan.is_active_in(month) { "active" } else { "closed" }
        );
    }
    Ok(())
}

pub async fn cmd_sip_add(fund_name: &str, amount: f64, start_date: Option<&str>) -> Result<()> {
    let ctx = Ctx::open().await?;
    let start_date = match start_date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid --start-date (use YYYY-MM-DD)"))?,
        None => Month::from_date(Utc::now().date_naive()).first_day(),
    };

    let plan = ctx
        .store
        .add_sip_plan(&NewSipPlan {
            user_id: ctx.session.user_id.clone(),
            fund_name: fund_name.to_string(),
            amount,
            start_date,
            end_date: None,
        })
        .await?;

    println!(
        "✅ Started SIP {} at {} / month from {}",
        plan.fund_name,
        format_amount(&ctx.config.currency, plan.amount),
        plan.start_date
    );
    Ok(())
}

pub async fn cmd_sip_close(id: i64) -> Result<()> {
    let ctx = Ctx::open().await?;
    let month = Month::from_date(Utc::now().date_naive());
    ctx.store.close_sip_plan(id, month.last_day()).await?;
    println!("✅ Plan {} closes after {}", id, month);
    Ok(())
}

pub async fn cmd_sip_supersede(id: i64, new_amount: f64) -> Result<()> {
    let ctx = Ctx::open().await?;
    let plans = ctx.store.list_sip_plans().await?;
    let Some(plan) = plans.iter().find(|p| p.id == id) else {
        bail!("No SIP plan with id {}", id);
    };

    let today = Utc::now().date_naive();
    let replacement = ctx.store.supersede_sip_plan(plan, new_amount, today).await?;

    println!(
        "✅ {} changes from {} to {} starting {}",
        replacement.fund_name,
        format_amount(&ctx.config.currency, plan.amount),
        format_amount(&ctx.config.currency, replacement.amount),
        replacement.start_date
    );
    Ok(())
}
