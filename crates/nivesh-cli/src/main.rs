//! Nivesh CLI - Personal finance dashboard
//!
//! Usage:
//!   nivesh login you@example.com   Sign in to the backend
//!   nivesh dashboard               Monthly summary (reconciles first)
//!   nivesh expenses add Food 450   Record an expense
//!   nivesh report net-worth        Net worth by month

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Login { email, password } => {
            commands::cmd_login(&email, password.as_deref()).await
        }
        Commands::Logout => commands::cmd_logout().await,
        Commands::Status => commands::cmd_status(),
        Commands::Dashboard => commands::cmd_dashboard().await,
        Commands::Epf { action } => match action {
            None | Some(EpfAction::List) => commands::cmd_epf_list().await,
            Some(EpfAction::Add {
                amount,
                date,
                notes,
            }) => commands::cmd_epf_add(amount, date.as_deref(), notes.as_deref()).await,
            Some(EpfAction::Status) => commands::cmd_epf_status().await,
        },
        Commands::Sip { action } => match action {
            None | Some(SipAction::List) => commands::cmd_sip_list().await,
            Some(SipAction::Add {
                fund_name,
                amount,
                start_date,
            }) => commands::cmd_sip_add(&fund_name, amount, start_date.as_deref()).await,
            Some(SipAction::Close { id }) => commands::cmd_sip_close(id).await,
            Some(SipAction::Supersede { id, new_amount }) => {
                commands::cmd_sip_supersede(id, new_amount).await
            }
        },
        Commands::Investments { action } => match action {
            None | Some(InvestmentsAction::List) => commands::cmd_investments_list().await,
            Some(InvestmentsAction::Add {
                name,
                amount,
                date,
                notes,
            }) => {
                commands::cmd_investments_add(&name, amount, date.as_deref(), notes.as_deref())
                    .await
            }
            Some(InvestmentsAction::Delete { id }) => commands::cmd_investments_delete(id).await,
        },
        Commands::Expenses { action } => match action {
            None => commands::cmd_expenses_list("this-month").await,
            Some(ExpensesAction::List { period }) => commands::cmd_expenses_list(&period).await,
            Some(ExpensesAction::Add {
                category,
                amount,
                date,
                description,
            }) => {
                commands::cmd_expenses_add(
                    &category,
                    amount,
                    date.as_deref(),
                    description.as_deref(),
                )
                .await
            }
            Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(id).await,
        },
        Commands::Banks { action } => match action {
            None | Some(BanksAction::List) => commands::cmd_banks_list().await,
            Some(BanksAction::Add { name, balance }) => {
                commands::cmd_banks_add(&name, balance).await
            }
            Some(BanksAction::SetBalance { id, balance }) => {
                commands::cmd_banks_set_balance(id, balance).await
            }
        },
        Commands::Salary { action } => match action {
            None | Some(SalaryAction::List) => commands::cmd_salary_list().await,
            Some(SalaryAction::Add {
                amount,
                date,
                source,
            }) => commands::cmd_salary_add(amount, date.as_deref(), source.as_deref()).await,
        },
        Commands::Report { report_type } => match report_type {
            ReportType::NetWorth { json } => commands::cmd_report_net_worth(json).await,
            ReportType::Savings { period, json } => {
                commands::cmd_report_savings(&period, json).await
            }
            ReportType::Categories { period, json } => {
                commands::cmd_report_categories(&period, json).await
            }
            ReportType::Yoy { year, json } => commands::cmd_report_yoy(year, json).await,
        },
        Commands::Reconcile { dry_run } => commands::cmd_reconcile(dry_run).await,
        Commands::Skip => commands::cmd_skip().await,
        Commands::Export { export_type } => match export_type {
            ExportType::Expenses { output } => {
                commands::cmd_export_expenses(output.as_deref()).await
            }
            ExportType::Investments { output } => {
                commands::cmd_export_investments(output.as_deref()).await
            }
        },
    }
}
