//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `auth` - Sign in/out commands
//! - `banks` - Bank account commands
//! - `core` - Status and dashboard commands, shared `Ctx` helper
//! - `epf` - EPF contribution commands
//! - `expenses` - Expense commands
//! - `export` - CSV export commands
//! - `investments` - Investment commands
//! - `reconcile` - Reconcile and skip commands
//! - `reports` - Report generation commands
//! - `salary` - Salary record commands
//! - `sips` - SIP plan commands

pub mod auth;
pub mod banks;
pub mod core;
pub mod epf;
pub mod expenses;
pub mod export;
pub mod investments;
pub mod reconcile;
pub mod reports;
pub mod salary;
pub mod sips;

// Re-export command functions for main.rs
pub use auth::*;
pub use banks::*;
pub use core::*;
pub use epf::*;
pub use expenses::*;
pub use export::*;
pub use investments::*;
pub use reconcile::*;
pub use reports::*;
pub use salary::*;
pub use sips::*;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use nivesh_core::auth::default_session_path;
use nivesh_core::{AuthClient, Config, RestStore, Session};

/// Shared handles for commands that talk to the backend
pub struct Ctx {
    pub config: Config,
    pub session: Session,
    pub store: RestStore,
    session_path: PathBuf,
}

impl Ctx {
    /// Load config and session, refreshing the access token if needed
    pub async fn open() -> Result<Self> {
        let config = Config::load()?;
        let session_path = default_session_path()?;
        let mut session = Session::load(&session_path)?
            .ok_or(nivesh_core::Error::NotSignedIn)?;

        if session.is_expired() {
            let auth = AuthClient::new(&config.backend_url, &config.api_key);
            session = auth
                .refresh(&session)
                .await
                .context("Session expired and refresh failed; run `nivesh login`")?;
            session.save(&session_path)?;
        }

        let store = RestStore::new(&config.backend_url, &config.api_key, &session.access_token);
        Ok(Self {
            config,
            session,
            store,
            session_path,
        })
    }

    /// Persist the (possibly updated) session
    pub fn save_session(&self) -> Result<()> {
        self.session.save(&self.session_path)?;
        Ok(())
    }
}

/// Parse an optional YYYY-MM-DD argument, defaulting to today
pub fn parse_date_arg(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid date format (use YYYY-MM-DD)"),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Format a currency amount with Indian digit grouping
/// (e.g. `₹12,34,567.89`)
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    format!("{}{}{}.{}", sign, symbol, group_indian(int_part), frac_part)
}

/// Group an ASCII digit string Indian-style: last 3 digits, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
