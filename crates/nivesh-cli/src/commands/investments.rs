//! Investment commands

use anyhow::Result;

use nivesh_core::models::{InvestmentKind, NewInvestment};

use super::{format_amount, parse_date_arg, truncate, Ctx};

pub async fn cmd_investments_list() -> Result<()> {
    let ctx = Ctx::open().await?;
    let investments = ctx.store.list_investments().await?;

    println!();
    println!("📊 Investments");
    if investments.is_empty() {
        println!("   No investments recorded yet.");
        return Ok(());
    }

    println!(
        "   {:>5} │ {:10} │ {:6} │ {:25} │ {:>12} │ {}",
        "ID", "Date", "Kind", "Name", "Amount", "Notes"
    );
    println!("   ──────┼────────────┼────────┼───────────────────────────┼──────────────┼──────────");
    let mut total = 0.0;
    for investment in &investments {
        total += investment.amount;
        println!(
            "   {:>5} │ {:10} │ {:6} │ {:25} │ {:>12} │ {}",
            investment.id,
            investment.date.to_string(),
            investment.kind.to_string(),
            truncate(&investment.name, 25),
            format_amount(&ctx.config.currency, investment.amount),
            truncate(investment.notes.as_deref().unwrap_or(""), 15)
        );
    }
    println!();
    println!("   Total invested: {}", format_amount(&ctx.config.currency, total));
    Ok(())
}

pub async fn cmd_investments_add(
    name: &str,
    amount: f64,
    date: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let ctx = Ctx::open().await?;
    let date = parse_date_arg(date)?;

    let investment = ctx
        .store
        .add_investment(&NewInvestment {
            user_id: ctx.session.user_id.clone(),
            sip_plan_id: None,
            kind: InvestmentKind::Manual,
            name: name.to_string(),
            amount,
            date,
            notes: notes.map(str::to_string),
        })
        .await?;

    println!(
        "✅ Recorded investment {} ({}) on {}",
        investment.name,
        format_amount(&ctx.config.currency, investment.amount),
        investment.date
    );
    Ok(())
}

pub async fn cmd_investments_delete(id: i64) -> Result<()> {
    let ctx = Ctx::open().await?;
    ctx.store.delete_investment(id).await?;
    println!("🗑️  Deleted investment {}", id);
    Ok(())
}
