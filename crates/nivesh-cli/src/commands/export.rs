//! CSV export commands

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use nivesh_core::export::{write_expenses_csv, write_investments_csv};

use super::Ctx;

pub async fn cmd_export_expenses(output: Option<&Path>) -> Result<()> {
    let ctx = Ctx::open().await?;
    let expenses = ctx.store.list_expenses().await?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_expenses_csv(file, &expenses)?;
            println!("✅ Exported {} expenses to {}", expenses.len(), path.display());
        }
        None => write_expenses_csv(std::io::stdout().lock(), &expenses)?,
    }
    Ok(())
}

pub async fn cmd_export_investments(output: Option<&Path>) -> Result<()> {
    let ctx = Ctx::open().await?;
    let investments = ctx.store.list_investments().await?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_investments_csv(file, &investments)?;
            println!(
                "✅ Exported {} investments to {}",
                investments.len(),
                path.display()
            );
        }
        None => write_investments_csv(std::io::stdout().lock(), &investments)?,
    }
    Ok(())
}
