//! Reconcile and skip commands

use anyhow::Result;
use chrono::Utc;

use nivesh_core::reconcile;
use nivesh_core::{ContributionStore, Month};

use super::{format_amount, Ctx};

/// Ensure this month's recurring entries exist. Unlike the dashboard's
/// guarded pass, an explicit reconcile ignores the session marker; the
/// existence checks still make it idempotent.
pub async fn cmd_reconcile(dry_run: bool) -> Result<()> {
    let mut ctx = Ctx::open().await?;
    let today = Utc::now().date_naive();
    let month = Month::from_date(today);
    let currency = ctx.config.currency.clone();

    if dry_run {
        let contributions = ctx.store.epf_contributions_in(month).await?;
        let plans = ctx.store.sip_plans().await?;
        let investments = ctx.store.investments_in(month).await?;

        let plan = reconcile::plan(
            &ctx.session.user_id,
            today,
            None,
            ctx.config.epf_monthly_amount,
            &contributions,
            &plans,
            &investments,
        );

        if plan.is_empty() {
            println!("✅ {} is up to date, nothing to insert", month);
            return Ok(());
        }
        println!("Would insert for {}:", month);
        if let Some(epf) = &plan.epf {
            println!(
                "   EPF contribution {} dated {}",
                format_amount(&currency, epf.amount),
                epf.date
            );
        }
        for sip in &plan.sips {
            println!(
                "   SIP investment {} ({}) dated {}",
                sip.name,
                format_amount(&currency, sip.amount),
                sip.date
            );
        }
        return Ok(());
    }

    let outcome = reconcile::run(
        &ctx.store,
        &ctx.session.user_id,
        today,
        None,
        ctx.config.epf_monthly_amount,
    )
    .await;
    if outcome.checked {
        ctx.session.last_reconciled = Some(month);
        ctx.save_session()?;
    }

    if outcome.is_empty() {
        println!("✅ {} is up to date, nothing inserted", month);
        return Ok(());
    }
    if let Some(epf) = &outcome.epf {
        println!(
            "✅ Added EPF contribution {} dated {}",
            format_amount(&currency, epf.amount),
            epf.date
        );
    }
    for investment in &outcome.investments {
        println!(
            "✅ Added SIP investment {} ({}) dated {}",
            investment.name,
            format_amount(&currency, investment.amount),
            investment.date
        );
    }
    Ok(())
}

/// Skip this month's SIP investments by inserting zero-amount markers
pub async fn cmd_skip() -> Result<()> {
    let ctx = Ctx::open().await?;
    let today = Utc::now().date_naive();
    let month = Month::from_date(today);

    let markers = reconcile::skip_month(&ctx.store, &ctx.session.user_id, today).await;

    if markers.is_empty() {
        println!("Nothing to skip for {} (no active plan is still pending)", month);
        return Ok(());
    }
    for marker in &markers {
        println!("⏭️  Skipped {} for {}", marker.name, month);
    }
    Ok(())
}
