//! EPF contribution commands

use anyhow::Result;
use chrono::Utc;

use nivesh_core::models::NewEpfContribution;
use nivesh_core::reconcile::epf_status;
use nivesh_core::Month;

use super::{format_amount, parse_date_arg, truncate, Ctx};

pub async fn cmd_epf_list() -> Result<()> {
    let ctx = Ctx::open().await?;
    let contributions = ctx.store.list_epf_contributions().await?;

    println!();
    println!("🏦 EPF Contributions");
    if contributions.is_empty() {
        println!("   No contributions recorded yet.");
        return Ok(());
    }

    println!("   {:>5} │ {:10} │ {:>12} │ {}", "ID", "Date", "Amount", "Notes");
    println!("   ──────┼────────────┼──────────────┼─────────────────");
    let mut total = 0.0;
    for c in &contributions {
        total += c.amount;
        println!(
            "   {:>5} │ {:10} │ {:>12} │ {}",
            c.id,
            c.date.to_string(),
            format_amount(&ctx.config.currency, c.amount),
            truncate(c.notes.as_deref().unwrap_or(""), 20)
        );
    }
    println!();
    println!("   Total: {}", format_amount(&ctx.config.currency, total));
    Ok(())
}

pub async fn cmd_epf_add(amount: f64, date: Option<&str>, notes: Option<&str>) -> Result<()> {
    let ctx = Ctx::open().await?;
    let date = parse_date_arg(date)?;

    let contribution = ctx
        .store
        .add_epf_contribution(&NewEpfContribution {
            user_id: ctx.session.user_id.clone(),
            amount,
            date,
            notes: notes.map(str::to_string),
        })
        .await?;

    println!(
        "✅ Recorded EPF contribution {} on {}",
        format_amount(&ctx.config.currency, contribution.amount),
        contribution.date
    );
    Ok(())
}

pub async fn cmd_epf_status() -> Result<()> {
    let ctx = Ctx::open().await?;
    let today = Utc::now().date_naive();
    let month = Month::from_date(today);
    let contributions = ctx
        .store
        .list_epf_contributions_between(month.first_day(), month.last_day())
        .await?;

    println!(
        "EPF for {}: {}",
        month,
        epf_status(today, &contributions)
    );
    Ok(())
}
