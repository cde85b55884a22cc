//! Expense commands

use anyhow::Result;

use nivesh_core::models::NewExpense;

use super::reports::resolve_period;
use super::{format_amount, parse_date_arg, truncate, Ctx};

pub async fn cmd_expenses_list(period: &str) -> Result<()> {
    let ctx = Ctx::open().await?;
    let (from, to) = resolve_period(period)?;
    let expenses = ctx.store.list_expenses_between(from, to).await?;

    println!();
    println!("🧾 Expenses ({} to {})", from, to);
    if expenses.is_empty() {
        println!("   No expenses in this period.");
        return Ok(());
    }

    println!(
        "   {:>5} │ {:10} │ {:15} │ {:>12} │ {}",
        "ID", "Date", "Category", "Amount", "Description"
    );
    println!("   ──────┼────────────┼─────────────────┼──────────────┼──────────────");
    let mut total = 0.0;
    for expense in &expenses {
        total += expense.amount;
        println!(
            "   {:>5} │ {:10} │ {:15} │ {:>12} │ {}",
            expense.id,
            expense.date.to_string(),
            truncate(&expense.category, 15),
            format_amount(&ctx.config.currency, expense.amount),
            truncate(expense.description.as_deref().unwrap_or(""), 25)
        );
    }
    println!();
    println!("   Total: {}", format_amount(&ctx.config.currency, total));
    Ok(())
}

pub async fn cmd_expenses_add(
    category: &str,
    amount: f64,
    date: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let ctx = Ctx::open().await?;
    let date = parse_date_arg(date)?;

    let expense = ctx
        .store
        .add_expense(&NewExpense {
            user_id: ctx.session.user_id.clone(),
            category: category.to_string(),
            description: description.map(str::to_string),
            amount,
            date,
        })
        .await?;

    println!(
        "✅ Recorded {} expense {} on {}",
        expense.category,
        format_amount(&ctx.config.currency, expense.amount),
        expense.date
    );
    Ok(())
}

pub async fn cmd_expenses_delete(id: i64) -> Result<()> {
    let ctx = Ctx::open().await?;
    ctx.store.delete_expense(id).await?;
    println!("🗑️  Deleted expense {}", id);
    Ok(())
}
