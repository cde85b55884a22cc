//! Bank account commands

use anyhow::Result;
use chrono::Utc;

use nivesh_core::models::NewBankAccount;

use super::{format_amount, truncate, Ctx};

pub async fn cmd_banks_list() -> Result<()> {
    let ctx = Ctx::open().await?;
    let accounts = ctx.store.list_bank_accounts().await?;

    println!();
    println!("🏛️  Bank Accounts");
    if accounts.is_empty() {
        println!("   No accounts yet. Add one with `nivesh banks add`.");
        return Ok(());
    }

    println!(
        "   {:>5} │ {:25} │ {:>14} │ {}",
        "ID", "Account", "Balance", "As of"
    );
    println!("   ──────┼───────────────────────────┼────────────────┼────────────");
    let mut total = 0.0;
    for account in &accounts {
        total += account.balance;
        println!(
            "   {:>5} │ {:25} │ {:>14} │ {}",
            account.id,
            truncate(&account.name, 25),
            format_amount(&ctx.config.currency, account.balance),
            account.as_of
        );
    }
    println!();
    println!("   Total: {}", format_amount(&ctx.config.currency, total));
    Ok(())
}

pub async fn cmd_banks_add(name: &str, balance: f64) -> Result<()> {
    let ctx = Ctx::open().await?;
    let account = ctx
        .store
        .add_bank_account(&NewBankAccount {
            user_id: ctx.session.user_id.clone(),
            name: name.to_string(),
            balance,
            as_of: Utc::now().date_naive(),
        })
        .await?;

    println!(
        "✅ Added account {} with balance {}",
        account.name,
        format_amount(&ctx.config.currency, account.balance)
    );
    Ok(())
}

pub async fn cmd_banks_set_balance(id: i64, balance: f64) -> Result<()> {
    let ctx = Ctx::open().await?;
    let today = Utc::now().date_naive();
    ctx.store.set_bank_balance(id, balance, today).await?;
    println!(
        "✅ Account {} balance set to {}",
        id,
        format_amount(&ctx.config.currency, balance)
    );
    Ok(())
}
