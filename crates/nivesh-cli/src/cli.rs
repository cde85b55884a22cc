//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nivesh - Personal finance dashboard
#[derive(Parser)]
#[command(name = "nivesh")]
#[command(about = "Track salary, EPF, SIPs, expenses and net worth", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in to the backend
    Login {
        /// Account email
        email: String,

        /// Password (read from stdin if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out and clear the local session
    Logout,

    /// Show session and config status
    Status,

    /// Show the dashboard summary (runs the monthly reconciler first)
    Dashboard,

    /// Manage EPF contributions
    Epf {
        #[command(subcommand)]
        action: Option<EpfAction>,
    },

    /// Manage SIP plans
    Sip {
        #[command(subcommand)]
        action: Option<SipAction>,
    },

    /// Manage investments
    Investments {
        #[command(subcommand)]
        action: Option<InvestmentsAction>,
    },

    /// Manage expenses
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Manage bank accounts
    Banks {
        #[command(subcommand)]
        action: Option<BanksAction>,
    },

    /// Manage salary records
    Salary {
        #[command(subcommand)]
        action: Option<SalaryAction>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Ensure this month's recurring entries exist
    Reconcile {
        /// Show what would be inserted without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Skip this month's SIP investments (inserts zero-amount markers)
    Skip,

    /// Export data as CSV
    Export {
        #[command(subcommand)]
        export_type: ExportType,
    },
}

#[derive(Subcommand)]
pub enum EpfAction {
    /// List contributions
    List,

    /// Record a contribution
    Add {
        /// Amount
        amount: f64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-form note
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Show this month's obligation status
    Status,
}

#[derive(Subcommand)]
pub enum SipAction {
    /// List plans
    List,

    /// Start a new plan
    Add {
        /// Fund name
        fund_name: String,

        /// Monthly amount
        amount: f64,

        /// Start date (YYYY-MM-DD, defaults to the 1st of this month)
        #[arg(long)]
        start_date: Option<String>,
    },

    /// Close a plan at the end of the current month
    Close {
        /// Plan ID
        id: i64,
    },

    /// Change a plan's amount from next month (keeps history)
    Supersede {
        /// Plan ID
        id: i64,

        /// New monthly amount
        new_amount: f64,
    },
}

#[derive(Subcommand)]
pub enum InvestmentsAction {
    /// List investment entries
    List,

    /// Record a manual investment
    Add {
        /// Investment name
        name: String,

        /// Amount
        amount: f64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-form note
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Investment ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses for a period
    List {
        /// Period: this-month, last-month, this-year, last-12-months, all
        #[arg(short, long, default_value = "this-month")]
        period: String,
    },

    /// Record an expense
    Add {
        /// Category (e.g. Food, Rent, Transport)
        category: String,

        /// Amount
        amount: f64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// What it was for
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BanksAction {
    /// List accounts
    List,

    /// Add an account
    Add {
        /// Account name
        name: String,

        /// Current balance
        balance: f64,
    },

    /// Update an account's balance
    SetBalance {
        /// Account ID
        id: i64,

        /// New balance
        balance: f64,
    },
}

#[derive(Subcommand)]
pub enum SalaryAction {
    /// List salary credits
    List,

    /// Record a salary credit
    Add {
        /// Amount
        amount: f64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Employer or payer
        #[arg(long)]
        source: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Net worth by month
    NetWorth {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Monthly savings rate
    Savings {
        /// Period: this-month, last-month, this-year, last-12-months, all
        #[arg(short, long, default_value = "last-12-months")]
        period: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Expense breakdown by category
    Categories {
        /// Period: this-month, last-month, this-year, last-12-months, all
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Year-over-year expense comparison
    Yoy {
        /// Year to compare (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ExportType {
    /// Export expenses as CSV
    Expenses {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export investments as CSV
    Investments {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
