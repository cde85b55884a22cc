//! Salary record commands

use anyhow::Result;

use nivesh_core::models::NewSalaryRecord;

use super::{format_amount, parse_date_arg, truncate, Ctx};

pub async fn cmd_salary_list() -> Result<()> {
    let ctx = Ctx::open().await?;
    let records = ctx.store.list_salary_records().await?;

    println!();
    println!("💼 Salary");
    if records.is_empty() {
        println!("   No salary recorded yet.");
        return Ok(());
    }

    println!(
        "   {:>5} │ {:10} │ {:>14} │ {}",
        "ID", "Date", "Amount", "Source"
    );
    println!("   ──────┼────────────┼────────────────┼──────────────");
    for record in &records {
        println!(
            "   {:>5} │ {:10} │ {:>14} │ {}",
            record.id,
            record.date.to_string(),
            format_amount(&ctx.config.currency, record.amount),
            truncate(record.source.as_deref().unwrap_or(""), 20)
        );
    }
    Ok(())
}

pub async fn cmd_salary_add(amount: f64, date: Option<&str>, source: Option<&str>) -> Result<()> {
    let ctx = Ctx::open().await?;
    let date = parse_date_arg(date)?;

    let record = ctx
        .store
        .add_salary_record(&NewSalaryRecord {
            user_id: ctx.session.user_id.clone(),
            amount,
            date,
            source: source.map(str::to_string),
            notes: None,
        })
        .await?;

    println!(
        "✅ Recorded salary {} on {}",
        format_amount(&ctx.config.currency, record.amount),
        record.date
    );
    Ok(())
}
